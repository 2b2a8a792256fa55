pub mod needs;
pub mod survivor;
pub mod tasks;

pub use needs::{compute_status_from_stats, NeedType, Needs, SurvivorStatus};
pub use survivor::{default_roster, Survivor, SurvivorAction};
pub use tasks::{ActivityStartRecord, PendingActivity, ReservedActivity, RestGear};
