use crate::core::DocumentResult;
use crate::models::DocumentKind;
use crate::pdf::Canvas;

use super::RenderContext;

/// Rotina de desenho de um tipo de documento.
pub trait Layout: Send + Sync {
    type Request;

    fn kind(&self) -> DocumentKind;

    /// Desenha o documento inteiro, em uma ou mais páginas.
    fn draw(&self, request: &Self::Request, ctx: &RenderContext) -> DocumentResult<Canvas>;
}
