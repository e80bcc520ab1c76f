mod budget;
mod certificate;
mod contract;
mod invoice;
mod letter;
mod receipt;
mod thermal_invoice;

pub use budget::BudgetLayout;
pub use certificate::CertificateLayout;
pub use contract::ContractLayout;
pub use invoice::{qr_summary, InvoiceLayout};
pub use letter::LetterLayout;
pub use receipt::ReceiptLayout;
pub use thermal_invoice::ThermalInvoiceLayout;
