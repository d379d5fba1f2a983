/// Errors raised when building geometry inputs from untrusted values.
///
/// The mapping functions themselves never fail; only the size types reject
/// dimensions that would make every transform degenerate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid image size {width}x{height} (both dimensions must be > 0)")]
    InvalidImageSize { width: u32, height: u32 },
    #[error("invalid view size {width}x{height} (both dimensions must be finite and > 0)")]
    InvalidViewSize { width: f64, height: f64 },
}
