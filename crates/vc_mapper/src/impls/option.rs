use crate::Reflect;
use crate::info::{GenericDescriptorCell, TypeDescriptor, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitOptional};

impl<T: Typed> Typed for Option<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| TypeDescriptor::optional::<Self, T>())
    }
}

impl<T: GetTypeMeta + Reflect> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitOptional>(FromType::<Self>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}
