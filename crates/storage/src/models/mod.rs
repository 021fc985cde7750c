pub mod class;
pub mod inscription;
pub mod judge;
pub mod roster;
pub mod schedule;
pub mod show;

pub use class::ShowClass;
pub use inscription::{ClassEntry, Inscription};
pub use judge::{Judge, JudgePosition};
pub use roster::{BREAK_NAME, BreakSlot, RiderSlot, RosterEntry};
pub use schedule::{
    ClassPlan, ClassScheduleRow, JudgeScheduleRow, JudgeSlot, RiderScheduleRow, RingPlan,
    RingScheduleRow, ScheduleRecord, ScheduledClassRef, SchedulePlan,
};
pub use show::Show;
pub use test::DressageTest;
