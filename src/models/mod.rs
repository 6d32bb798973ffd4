//! Domain models for the notification dispatch bus, one module per table.

mod notification;
pub mod notification_type;
mod organisation;
mod provider;
pub mod state;
pub mod system;
mod template;

pub use notification::{NewNotification, Notification, NotificationOutcome};
pub use notification_type::NotificationType;
pub use organisation::{NewOrganisation, Organisation};
pub use provider::{NewProvider, Provider};
pub use state::State;
pub use system::{NewSystem, System, UpdateSystem};
pub use template::{NewTemplate, Template};
