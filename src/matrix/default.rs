use std::sync::LazyLock;

use crate::matrix::parse;
use crate::types::matrix::CanMatrix;

/// Bundled catalog document, embedded at compile time.
const DEFAULT_CATALOG: &str = include_str!("default_matrix.dbc");

static DEFAULT_MATRIX: LazyLock<CanMatrix> = LazyLock::new(|| parse::from_text(DEFAULT_CATALOG));

/// The bundled default catalog, for callers that supply none of their own.
///
/// Built once per process on first use and immutable afterwards.
pub fn default_matrix() -> &'static CanMatrix {
    &DEFAULT_MATRIX
}
