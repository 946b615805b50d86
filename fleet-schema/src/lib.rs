pub mod crew;
pub mod error;
pub mod list;
pub mod ship;

pub use crew::{CrewMember, CrewMemberDraft, CrewRole, UnknownCrewRole};
pub use error::{ErrorBody, ErrorObject, MessageBody};
pub use list::{
    DEFAULT_PAGE_SIZE, ListParams, PARAM_PAGE, PARAM_PAGE_SIZE, PARAM_SORT_FIELD,
    PARAM_SORT_ORDER, ShipField, ShipList, SortOrder,
};
pub use ship::{Ship, ShipDraft};
