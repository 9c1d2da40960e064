//! Domain definitions.

pub mod company;
pub mod contract;
pub mod distributor;
pub mod lead;
pub mod note;
pub mod order;
pub mod partner;
pub mod product;
pub mod product_type;
pub mod status;
pub mod user;

pub use self::{
    contract::Contract, distributor::Distributor, lead::Lead, note::Note,
    order::Order, partner::Partner, product::Product,
    product_type::ProductType,
};
