//! POAP attendance and co-attendee recommendations.
//!
//! Two dependent stages: the scan API lists the events an address attended,
//! then the subgraph is asked, event by event, who else holds that event's
//! token.

pub mod co_attendees;
pub mod events;
pub mod recommendation;

pub use co_attendees::PoapCoAttendeeResolver;
pub use events::PoapEventLister;
pub use recommendation::PoapRecommender;
