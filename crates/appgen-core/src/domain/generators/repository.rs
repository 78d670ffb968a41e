//! `<E>Repository`: abstract read side over the ORM repository.

use crate::domain::common::first_lower;
use crate::domain::entities::SpecificationRecord;
use crate::domain::generators::{
    ENTITY_MANAGER, OBJECT_REPOSITORY, QUERY_BUILDER, entity_variable, id_hint, lookup_hint,
    use_class, use_hint,
};
use crate::domain::source::{
    ClassDecl, ClassModifier, MethodDecl, Param, SourceUnit, TypeHint, Visibility,
};
use crate::domain::value_objects::PrimitiveType;

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let entity = spec.entity_class();
    let not_found = spec.not_found_class();
    let var = entity_variable(spec);

    let mut class = ClassDecl::new(spec.repository_class().name()).modifier(ClassModifier::Abstract);

    class.methods.push(
        MethodDecl::public("__construct").param(Param::promoted(
            "entityManager",
            TypeHint::new(ENTITY_MANAGER),
            Visibility::Private,
        )),
    );

    class.methods.push(
        MethodDecl::private("getRepository")
            .returns(TypeHint::new(OBJECT_REPOSITORY))
            .line(format!(
                "return $this->entityManager->getRepository({}::class);",
                entity.name()
            )),
    );

    class.methods.push(
        MethodDecl::public("get")
            .param(Param::new("id", id_hint(spec)))
            .returns(TypeHint::new(&entity))
            .doc_line(format!("@throws {}", not_found.name()))
            .lines(find_one_body(spec, &var, "id", "id")),
    );

    for property in spec.single_lookups() {
        let parameter = property.lookup_parameter();
        class.methods.push(
            MethodDecl::public(format!("getBy{}", property.method_suffix()))
                .param(Param::new(&parameter, lookup_hint(spec, property)))
                .returns(TypeHint::new(&entity))
                .doc_line(format!("@throws {}", not_found.name()))
                .lines(find_one_body(
                    spec,
                    &var,
                    &first_lower(property.name()),
                    &parameter,
                )),
        );
    }

    for property in spec.multi_lookups() {
        let parameter = property.lookup_parameter();
        class.methods.push(
            MethodDecl::public(format!("getAllBy{}", property.method_suffix()))
                .param(Param::new(&parameter, lookup_hint(spec, property)))
                .returns(TypeHint::new("array"))
                .doc_line(format!("@return {}[]", entity.name()))
                .lines([
                    "return $this->getRepository()->findBy([".to_string(),
                    format!("\t'{}' => ${parameter}", first_lower(property.name())),
                    "]);".to_string(),
                ]),
        );
    }

    if spec.features().get_all {
        class.methods.push(
            MethodDecl::public("getAll")
                .returns(TypeHint::new("array"))
                .doc_line(format!("@return {}[]", entity.name()))
                .line("return $this->getQueryBuilderForAll()->getQuery()->execute();"),
        );
    }

    class.methods.push(
        MethodDecl::private("getQueryBuilderForAll")
            .returns(TypeHint::new(QUERY_BUILDER))
            .line("return $this->getRepository()->createQueryBuilder('e');"),
    );

    class.methods.push(
        MethodDecl::public("getQueryBuilderForDataGrid")
            .returns(TypeHint::new(QUERY_BUILDER))
            .line("return $this->getQueryBuilderForAll();"),
    );

    let mut unit = SourceUnit::new(spec.namespace(), class);
    let uses_datetime = spec
        .single_lookups()
        .chain(spec.multi_lookups())
        .any(|p| p.primitive_type() == Some(PrimitiveType::DateTime));
    if uses_datetime {
        unit.import("DateTime");
    }
    unit.import(ENTITY_MANAGER).import(QUERY_BUILDER);
    use_hint(&mut unit, &id_hint(spec));
    use_class(&mut unit, &not_found.to_string());
    unit.import(OBJECT_REPOSITORY);
    unit
}

/// Look up one entity by a column, throwing the not-found error on absence.
fn find_one_body(
    spec: &SpecificationRecord,
    var: &str,
    column: &str,
    parameter: &str,
) -> Vec<String> {
    vec![
        format!("/** @var {} ${var} */", spec.entity_name()),
        format!("${var} = $this->getRepository()->findOneBy(["),
        format!("\t'{column}' => ${parameter}"),
        "]);".to_string(),
        String::new(),
        format!("if (${var} === null) {{"),
        format!("\tthrow new {}();", spec.not_found_class().name()),
        "}".to_string(),
        String::new(),
        format!("return ${var};"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generators::fixtures;

    fn method<'a>(unit: &'a SourceUnit, name: &str) -> &'a MethodDecl {
        unit.declaration
            .method(name)
            .unwrap_or_else(|| panic!("missing method {name}"))
    }

    #[test]
    fn scalar_single_lookup() {
        let unit = generate(&fixtures::user());
        assert_eq!(unit.declaration.name, "UserRepository");
        assert_eq!(unit.declaration.modifier, ClassModifier::Abstract);

        let get = method(&unit, "get");
        assert_eq!(get.params[0].type_hint, Some(TypeHint::new("int")));
        assert_eq!(get.doc, ["@throws UserNotFoundException"]);

        let by_email = method(&unit, "getByEmail");
        assert_eq!(by_email.params[0].name, "email");
        assert_eq!(by_email.params[0].type_hint, Some(TypeHint::new("string")));
        assert_eq!(by_email.return_type, Some(TypeHint::new("App\\Model\\User")));
        assert!(by_email.body.contains(&"\t'email' => $email".to_string()));
        assert!(by_email.body.contains(&"\tthrow new UserNotFoundException();".to_string()));
        assert_eq!(by_email.body.last().unwrap(), "return $user;");

        let get_all = method(&unit, "getAll");
        assert_eq!(get_all.doc, ["@return User[]"]);
        assert_eq!(
            get_all.body,
            ["return $this->getQueryBuilderForAll()->getQuery()->execute();"]
        );

        assert_eq!(method(&unit, "getQueryBuilderForAll").visibility, Visibility::Private);
        assert_eq!(
            method(&unit, "getQueryBuilderForDataGrid").body,
            ["return $this->getQueryBuilderForAll();"]
        );
    }

    #[test]
    fn relation_multi_lookup_uses_id_parameter() {
        let unit = generate(&fixtures::book());
        let by_author = method(&unit, "getAllByAuthor");
        assert_eq!(by_author.params[0].name, "authorId");
        assert_eq!(
            by_author.params[0].type_hint,
            Some(TypeHint::new("Ramsey\\Uuid\\UuidInterface"))
        );
        assert_eq!(by_author.return_type, Some(TypeHint::new("array")));
        assert_eq!(
            by_author.body,
            [
                "return $this->getRepository()->findBy([",
                "\t'author' => $authorId",
                "]);"
            ]
        );
        assert!(unit.declaration.method("getAll").is_some());
        assert!(unit.declaration.method("getByAuthor").is_none());
    }

    #[test]
    fn imports_follow_lookups_and_id_strategy() {
        let imports: Vec<_> = generate(&fixtures::book())
            .imports
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert!(imports.contains(&"DateTime".to_string()));
        assert!(imports.contains(&"Ramsey\\Uuid\\UuidInterface".to_string()));
        assert!(imports.contains(&"App\\Model\\Book\\Exception\\BookNotFoundException".to_string()));

        let imports: Vec<_> = generate(&fixtures::user())
            .imports
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert!(!imports.contains(&"DateTime".to_string()));
        assert!(!imports.iter().any(|i| i.contains("Uuid")));
    }

    #[test]
    fn get_all_is_optional() {
        use crate::domain::value_objects::Features;
        let spec = crate::domain::entities::SpecificationRecord::builder("App\\Model", "User")
            .features(Features::none())
            .build()
            .unwrap();
        let unit = generate(&spec);
        assert!(unit.declaration.method("getAll").is_none());
        assert!(unit.declaration.method("getQueryBuilderForDataGrid").is_some());
    }
}
