//! `Exception\<E>NotFoundException`, thrown by single-result lookups.

use crate::domain::entities::SpecificationRecord;
use crate::domain::source::{ClassDecl, ClassModifier, MethodDecl, SourceUnit};

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let class_name = spec.not_found_class();

    let mut class = ClassDecl::new(class_name.name())
        .modifier(ClassModifier::Final)
        .extends("Exception");
    class.methods.push(
        MethodDecl::public("__construct")
            .line(format!("parent::__construct('{} not found.');", spec.entity_name())),
    );

    let mut unit = SourceUnit::new(class_name.namespace(), class);
    unit.import("Exception");
    unit
}
