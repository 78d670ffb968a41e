//! `<E>DataFactory`: builds the data object from submitted form values.

use crate::domain::entities::SpecificationRecord;
use crate::domain::source::{ClassDecl, ClassModifier, MethodDecl, Param, SourceUnit, TypeHint};

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let data = spec.data_class();

    let mut method = MethodDecl::public("createFromFormData")
        .param(Param::new("formData", TypeHint::new("array")))
        .returns(TypeHint::new(&data))
        .line(format!("$data = new {}();", data.name()));

    for property in spec.properties() {
        let name = property.name();
        let fallback = if property.is_to_many() {
            Some("[]")
        } else if property.nullable() {
            Some("null")
        } else {
            None
        };
        method = method.line(match fallback {
            Some(fallback) => format!("$data->{name} = $formData['{name}'] ?? {fallback};"),
            None => format!("$data->{name} = $formData['{name}'];"),
        });
    }
    method = method.line("").line("return $data;");

    let mut class =
        ClassDecl::new(spec.data_factory_class().name()).modifier(ClassModifier::Final);
    class.methods.push(method);
    SourceUnit::new(spec.namespace(), class)
}
