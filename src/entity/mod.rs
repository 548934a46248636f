pub mod invoices;

pub use invoices::Entity as Invoices;
