//! Raw-record to view-record transformation.

use crate::models::ListRecord;

/// Maps one raw server record onto its display-ready view.
///
/// Implementations are pure and total: unknown codes resolve to fallback
/// labels and absent optional fields to placeholders.
pub trait IntoView {
    type View: ListRecord;

    fn into_view(self) -> Self::View;
}

/// Transforms a batch of raw records, preserving order and length.
pub fn transform_records<R: IntoView>(raw: Vec<R>) -> Vec<R::View> {
    let count = raw.len();
    let views: Vec<R::View> = raw.into_iter().map(IntoView::into_view).collect();
    tracing::debug!(count = count, "Transformed raw records");
    views
}
