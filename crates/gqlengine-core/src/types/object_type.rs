use crate::loc;
use crate::types::Field;
use indexmap::IndexMap;

/// Shared shape of object and interface types.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ObjectOrInterfaceTypeData {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType(pub(crate) ObjectOrInterfaceTypeData);

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType(pub(crate) ObjectOrInterfaceTypeData);

macro_rules! object_or_interface_accessors {
    ($type:ty) => {
        impl $type {
            pub fn def_location(&self) -> &loc::SchemaDefLocation {
                &self.0.def_location
            }

            pub fn field(&self, name: &str) -> Option<&Field> {
                self.0.fields.get(name)
            }

            /// Fields in declaration order, extensions last.
            pub fn fields(&self) -> &IndexMap<String, Field> {
                &self.0.fields
            }

            /// Names of the interfaces this type declares that it implements.
            pub fn interfaces(&self) -> &[String] {
                &self.0.interfaces
            }

            pub fn name(&self) -> &str {
                self.0.name.as_str()
            }
        }
    };
}

object_or_interface_accessors!(ObjectType);
object_or_interface_accessors!(InterfaceType);
