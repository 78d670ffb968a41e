//! `<E>Facade`: the write side. Extends the repository and dispatches
//! lifecycle events.

use crate::domain::common::first_lower;
use crate::domain::entities::SpecificationRecord;
use crate::domain::generators::{
    ENTITY_MANAGER, EVENT_DISPATCHER, entity_variable, id_hint, use_class, use_hint,
};
use crate::domain::source::{
    ClassDecl, ClassModifier, MethodDecl, Param, SourceUnit, TypeHint, Visibility,
};

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let entity = spec.entity_class();
    let data = spec.data_class();
    let factory = spec.factory_class();
    let factory_var = first_lower(factory.name());
    let var = entity_variable(spec);
    let features = spec.features();
    let dispatches = !spec.events().is_empty();

    let mut class = ClassDecl::new(spec.facade_class().name())
        .modifier(ClassModifier::Final)
        .extends(spec.repository_class());

    let mut constructor = MethodDecl::public("__construct").param(Param::promoted(
        "entityManager",
        TypeHint::new(ENTITY_MANAGER),
        Visibility::Private,
    ));
    if dispatches {
        constructor = constructor.param(Param::promoted(
            "eventDispatcher",
            TypeHint::new(EVENT_DISPATCHER),
            Visibility::Private,
        ));
    }
    constructor = constructor
        .param(Param::promoted(
            &factory_var,
            TypeHint::new(&factory),
            Visibility::Private,
        ))
        .line("parent::__construct($entityManager);");
    class.methods.push(constructor);

    let dispatch = |event: &str| -> Vec<String> {
        if spec.has_event(event) {
            vec![
                format!(
                    "$this->eventDispatcher->dispatch(new {}(${var}));",
                    spec.event_class(event).name()
                ),
                String::new(),
            ]
        } else {
            Vec::new()
        }
    };

    class.methods.push(
        MethodDecl::public("create")
            .param(Param::new("data", TypeHint::new(&data)))
            .returns(TypeHint::new(&entity))
            .line(format!("${var} = $this->{factory_var}->create($data);"))
            .line("")
            .line(format!("$this->entityManager->persist(${var});"))
            .line("$this->entityManager->flush();")
            .line("")
            .lines(dispatch("created"))
            .line(format!("return ${var};")),
    );

    let not_found = spec.not_found_class();

    if features.edit {
        class.methods.push(
            MethodDecl::public("edit")
                .param(Param::new("id", id_hint(spec)))
                .param(Param::new("data", TypeHint::new(&data)))
                .returns(TypeHint::new(&entity))
                .doc_line(format!("@throws {}", not_found.name()))
                .line(format!("${var} = $this->get($id);"))
                .line(format!("${var}->edit($data);"))
                .line("")
                .line("$this->entityManager->flush();")
                .line("")
                .lines(dispatch("updated"))
                .line(format!("return ${var};")),
        );
    }

    if features.delete {
        let mut delete = MethodDecl::public("delete")
            .param(Param::new("id", id_hint(spec)))
            .returns(TypeHint::new("void"))
            .doc_line(format!("@throws {}", not_found.name()))
            .line(format!("${var} = $this->get($id);"))
            .line("")
            .line(format!("$this->entityManager->remove(${var});"))
            .line("$this->entityManager->flush();");
        let events = dispatch("deleted");
        if !events.is_empty() {
            delete = delete.line("").lines(events);
        }
        class.methods.push(delete);
    }

    let mut unit = SourceUnit::new(spec.namespace(), class);
    unit.import(ENTITY_MANAGER);
    if dispatches {
        unit.import(EVENT_DISPATCHER);
    }
    use_hint(&mut unit, &id_hint(spec));
    if features.edit || features.delete {
        use_class(&mut unit, &not_found.to_string());
    }
    for event in ["created", "updated", "deleted"] {
        if spec.has_event(event) {
            use_class(&mut unit, &spec.event_class(event).to_string());
        }
    }
    unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generators::fixtures;
    use crate::domain::source::Import;

    #[test]
    fn extends_repository_and_promotes_collaborators() {
        let unit = generate(&fixtures::user());
        assert_eq!(unit.declaration.name, "UserFacade");
        assert_eq!(unit.declaration.extends.as_deref(), Some("App\\Model\\UserRepository"));

        let constructor = unit.declaration.method("__construct").unwrap();
        let names: Vec<_> = constructor.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["entityManager", "eventDispatcher", "userFactory"]);
        assert!(constructor.params.iter().all(|p| p.promoted == Some(Visibility::Private)));
        assert_eq!(constructor.body, ["parent::__construct($entityManager);"]);
    }

    #[test]
    fn create_persists_and_dispatches() {
        let unit = generate(&fixtures::user());
        assert_eq!(
            unit.declaration.method("create").unwrap().body,
            [
                "$user = $this->userFactory->create($data);",
                "",
                "$this->entityManager->persist($user);",
                "$this->entityManager->flush();",
                "",
                "$this->eventDispatcher->dispatch(new UserCreatedEvent($user));",
                "",
                "return $user;"
            ]
        );
        assert!(unit.imports.contains(&Import::new("App\\Model\\Event\\UserCreatedEvent")));
        assert!(unit.imports.contains(&Import::new("App\\Model\\Event\\UserDeletedEvent")));
    }

    #[test]
    fn delete_dispatches_deleted_event() {
        let unit = generate(&fixtures::user());
        let delete = unit.declaration.method("delete").unwrap();
        assert_eq!(delete.return_type, Some(TypeHint::new("void")));
        assert_eq!(
            delete.body.last().unwrap(),
            "$this->eventDispatcher->dispatch(new UserDeletedEvent($user));"
        );
    }

    #[test]
    fn without_events_there_is_no_dispatcher() {
        let unit = generate(&fixtures::book());
        let constructor = unit.declaration.method("__construct").unwrap();
        assert_eq!(constructor.params.len(), 2);
        assert!(!unit.imports.contains(&Import::new(EVENT_DISPATCHER)));

        let create = unit.declaration.method("create").unwrap();
        assert!(!create.body.iter().any(|l| l.contains("dispatch")));
        assert_eq!(
            unit.declaration.method("edit").unwrap().params[0].type_hint,
            Some(TypeHint::new("Ramsey\\Uuid\\UuidInterface"))
        );
    }

    #[test]
    fn optional_methods_follow_features() {
        use crate::domain::value_objects::Features;
        let spec = crate::domain::entities::SpecificationRecord::builder("App\\Model", "User")
            .features(Features::none())
            .build()
            .unwrap();
        let unit = generate(&spec);
        assert!(unit.declaration.method("create").is_some());
        assert!(unit.declaration.method("edit").is_none());
        assert!(unit.declaration.method("delete").is_none());
    }
}
