mod convert;
mod core;
mod declaration;
mod error;
mod types;

pub use convert::{
    cast_to_array, cast_to_bool, cast_to_int, cast_to_string, cast_value, float_to_string,
    is_truthy, to_int,
};
pub use self::core::{cast_values, InputRecord};
pub(crate) use declaration::json_type_name;
pub use declaration::{CastDeclaration, TagPolicy};
pub use error::CastConfigError;
pub use types::{CastType, ARRAY, BOOL, BOOLEAN, INT, INTEGER, STRING};
