//! [`Command`] definition.

pub mod activate_order;
pub mod create_product;
pub mod create_user_session;
pub mod delete_user_session;
pub mod resource;
pub mod transition_status;
pub mod update_product;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    activate_order::ActivateOrder,
    create_product::CreateProduct,
    create_user_session::CreateUserSession,
    delete_user_session::DeleteUserSession,
    resource::{CreateResource, DeleteResource, UpdateResource},
    transition_status::{
        TransitionContractStatus, TransitionLeadStatus, TransitionOrderStatus,
        TransitionStatus,
    },
    update_product::UpdateProduct,
};
