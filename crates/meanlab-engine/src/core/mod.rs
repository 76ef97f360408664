pub use self::{definition::*, group::*, group_set::*, grouping::*, step::*};

mod definition;
mod group;
mod group_set;
mod grouping;
mod step;
