pub mod dispatcher;
pub mod exporters;

pub use dispatcher::{DeliveryQueue, DispatchError, ReportDispatch};
pub use exporters::webhook_forward::{DeliveryOutcome, WebhookForward};
