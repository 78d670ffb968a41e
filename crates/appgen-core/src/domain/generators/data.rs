//! `<E>Data`: the mutable transfer object the entity is built from.

use crate::domain::entities::SpecificationRecord;
use crate::domain::generators::{use_hint, value_hint};
use crate::domain::source::{ClassDecl, ClassModifier, PropertyDecl, SourceUnit, Visibility};

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let mut class = ClassDecl::new(spec.data_class().name()).modifier(ClassModifier::Final);

    for property in spec.properties() {
        let hint = value_hint(property);
        let mut decl = PropertyDecl::new(property.name(), Visibility::Public).typed(hint);
        if let Some(default) = property.default_value() {
            decl = decl.default_value(default.literal());
        } else if property.is_to_many() {
            decl = decl.default_value("[]");
        } else if property.nullable() {
            decl = decl.default_value("null");
        }
        class.properties.push(decl);
    }

    let mut unit = SourceUnit::new(spec.namespace(), class);
    for property in spec.properties() {
        use_hint(&mut unit, &value_hint(property));
    }
    unit
}
