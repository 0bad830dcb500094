//! Single pure decision entry point, decoupled from whatever mechanism
//! triggers re-evaluation (navigation change, DOM mutation, focus, load,
//! polling).

use crate::dom::DomNode;
use crate::domain::Domain;
use crate::page::PageState;
use crate::sensors::SensorTable;

/// Decide what to surface for the current page state: the element of the
/// best-ranked action recorded for the context `page` belongs to, or `None`.
///
/// Pure: no storage, no DOM mutation. Invoking it redundantly is harmless.
pub fn evaluate<N: DomNode>(
    root: &N,
    domain: &Domain,
    page: &PageState,
    sensors: &SensorTable,
) -> Option<N> {
    domain.target(root, page, sensors)
}
