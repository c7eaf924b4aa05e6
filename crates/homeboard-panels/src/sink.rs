use crate::panel::PanelUpdate;

/// The display surface that receives normalized records.
///
/// Publishing is synchronous and expected to be fast; the scheduler calls it
/// from panel refresh tasks and never inspects record contents. Rendering is
/// entirely the implementor's concern.
pub trait DisplaySink: Send + Sync {
    fn publish(&self, panel: &str, update: PanelUpdate);
}
