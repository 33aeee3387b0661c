/// Marker trait for intents: user actions (select, submit, scroll, reset)
/// and worker results (request finished or aborted).
pub trait Intent: Send + 'static {}
