//! `<E>Factory`: creates new entities from data objects.

use crate::domain::entities::SpecificationRecord;
use crate::domain::generators::UUID;
use crate::domain::source::{ClassDecl, ClassModifier, MethodDecl, Param, SourceUnit, TypeHint};

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let uuid = spec.id_strategy().is_uuid();
    let arguments = if uuid { "Uuid::uuid4(), $data" } else { "$data" };

    let create = MethodDecl::public("create")
        .param(Param::new("data", TypeHint::new(spec.data_class())))
        .returns(TypeHint::new(spec.entity_class()))
        .line(format!("return new {}({arguments});", spec.entity_name()));

    let mut class = ClassDecl::new(spec.factory_class().name()).modifier(ClassModifier::Final);
    class.methods.push(create);

    let mut unit = SourceUnit::new(spec.namespace(), class);
    if uuid {
        unit.import(UUID);
    }
    unit
}
