//! `Event\<E><X>Event`: an immutable event carrying the entity.

use crate::domain::common::first_upper;
use crate::domain::entities::SpecificationRecord;
use crate::domain::generators::{EVENT_BASE, entity_variable, use_class};
use crate::domain::source::{
    ClassDecl, ClassModifier, MethodDecl, Param, SourceUnit, TypeHint, Visibility,
};

pub fn generate(spec: &SpecificationRecord, event: &str) -> SourceUnit {
    let class_name = spec.event_class(event);
    let entity = spec.entity_class();
    let var = entity_variable(spec);

    let mut class = ClassDecl::new(class_name.name())
        .modifier(ClassModifier::Final)
        .extends(EVENT_BASE);
    class.methods.push(MethodDecl::public("__construct").param(Param::promoted(
        &var,
        TypeHint::new(&entity),
        Visibility::Private,
    )));
    class.methods.push(
        MethodDecl::public(format!("get{}", first_upper(&var)))
            .returns(TypeHint::new(&entity))
            .line(format!("return $this->{var};")),
    );

    let mut unit = SourceUnit::new(class_name.namespace(), class);
    use_class(&mut unit, &entity.to_string());
    unit.import(EVENT_BASE);
    unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generators::fixtures;
    use crate::domain::source::Import;

    #[test]
    fn carries_the_entity() {
        let unit = generate(&fixtures::user(), "updated");
        assert_eq!(unit.namespace, "App\\Model\\Event");
        assert_eq!(unit.declaration.name, "UserUpdatedEvent");
        assert_eq!(unit.declaration.extends.as_deref(), Some(EVENT_BASE));

        let constructor = unit.declaration.method("__construct").unwrap();
        assert_eq!(constructor.params[0].name, "user");
        assert!(constructor.body.is_empty());

        let getter = unit.declaration.method("getUser").unwrap();
        assert_eq!(getter.body, ["return $this->user;"]);
        assert!(unit.imports.contains(&Import::new("App\\Model\\User")));
    }
}
