//! Domain entities - audit records, schemas, and reconstructed changes

mod change;
mod field;
mod record;
mod schema;

pub use change::{Change, DisplayValue, FieldChange, EMPTY_CHOICE, NO_VALUE};
pub use field::{ChoiceSet, FieldDescriptor, FieldKind};
pub use record::{row_values, AuditRecord, RowValues};
pub use schema::EntitySchema;
