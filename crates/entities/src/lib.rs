//! `milladmin-entities` — the CRUD-managed record types of the back office.
//!
//! One module per entity: the record struct, its `EntityRecord` impl, and
//! its validation ruleset. Field sets mirror the admin panel's forms; every
//! record carries an `id`, an active `status` flag, and server-computed
//! timestamps.

pub mod branch;
pub mod category;
pub mod customer;
pub mod department;
pub mod grade;
pub mod labour;
pub mod machine;
pub mod product;
pub mod product_type;
pub mod quote;
pub mod stock_discard;
pub mod tax_slab;
pub mod uom;
pub mod work_shift;

mod macros;


pub use branch::Branch;
pub use category::Category;
pub use customer::Customer;
pub use department::Department;
pub use grade::Grade;
pub use labour::Labour;
pub use machine::Machine;
pub use product::Product;
pub use product_type::ProductType;
pub use quote::Quote;
pub use stock_discard::StockDiscard;
pub use tax_slab::TaxSlab;
pub use uom::Uom;
pub use work_shift::WorkShift;
