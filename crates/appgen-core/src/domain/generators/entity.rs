//! `<E>`: the Doctrine-mapped entity.

use crate::domain::common::{first_lower, first_upper};
use crate::domain::entities::{
    PropertyDescriptor, PropertyKind, RelationDescriptor, ScalarType, SpecificationRecord,
};
use crate::domain::generators::{
    ARRAY_COLLECTION, COLLECTION, ORM_MAPPING, id_hint, use_class, use_hint, value_hint,
};
use crate::domain::source::{ClassDecl, MethodDecl, Param, PropertyDecl, SourceUnit, TypeHint, Visibility};
use crate::domain::value_objects::{IdentifierStrategy, RelationKind};

pub fn generate(spec: &SpecificationRecord) -> SourceUnit {
    let data = spec.data_class();
    let edit = spec.features().edit;
    let mut class = ClassDecl::new(spec.entity_name()).doc_line("@ORM\\Entity");

    for definition in spec.traits().values() {
        class.traits.push(definition.to_string());
    }

    class.properties.push(id_property(spec));
    for property in spec.properties() {
        class.properties.push(mapped_property(spec, property));
    }

    // ── constructor ──
    let mut constructor = MethodDecl::public("__construct");
    if spec.id_strategy().is_uuid() {
        constructor = constructor
            .param(Param::new("id", id_hint(spec)))
            .line("$this->id = $id;");
    }
    constructor = constructor.param(Param::new("data", TypeHint::new(&data)));
    for property in spec.properties().iter().filter(|p| p.is_to_many()) {
        constructor = constructor.line(format!(
            "$this->{} = new ArrayCollection();",
            property.name()
        ));
    }
    if edit {
        constructor = constructor.line("$this->edit($data);");
    } else {
        constructor = constructor.lines(assign_from_data(spec));
    }
    class.methods.push(constructor);

    if edit {
        class.methods.push(
            MethodDecl::public("edit")
                .param(Param::new("data", TypeHint::new(&data)))
                .returns(TypeHint::new("void"))
                .lines(assign_from_data(spec)),
        );
        class.methods.push(
            MethodDecl::public("getData")
                .returns(TypeHint::new(&data))
                .lines(export_to_data(spec)),
        );
    }

    // ── getters ──
    class.methods.push(
        MethodDecl::public("getId")
            .returns(id_hint(spec))
            .line("return $this->id;"),
    );
    for property in spec.properties() {
        class.methods.push(getter(property));
    }

    let mut unit = SourceUnit::new(spec.namespace(), class);
    unit.import_as(ORM_MAPPING, "ORM");
    use_hint(&mut unit, &id_hint(spec));
    for definition in spec.traits().values() {
        use_class(&mut unit, &definition.to_string());
    }
    for property in spec.properties() {
        match property.kind() {
            PropertyKind::Relation(r) => use_class(&mut unit, &r.target().to_string()),
            PropertyKind::Scalar(_) => use_hint(&mut unit, &value_hint(property)),
        }
    }
    if spec.properties().iter().any(PropertyDescriptor::is_to_many) {
        unit.import(ARRAY_COLLECTION).import(COLLECTION);
    }
    unit
}

fn id_property(spec: &SpecificationRecord) -> PropertyDecl {
    let id = PropertyDecl::new("id", Visibility::Private)
        .typed(id_hint(spec))
        .doc_line("@ORM\\Id")
        .doc_line(format!(
            "@ORM\\Column(type=\"{}\")",
            spec.id_strategy().column_type()
        ));
    match spec.id_strategy() {
        IdentifierStrategy::Integer => id.doc_line("@ORM\\GeneratedValue"),
        IdentifierStrategy::Uuid { .. } => id,
    }
}

fn mapped_property(spec: &SpecificationRecord, property: &PropertyDescriptor) -> PropertyDecl {
    let decl = PropertyDecl::new(property.name(), Visibility::Private);
    match property.kind() {
        PropertyKind::Scalar(s) => decl
            .typed(value_hint(property))
            .doc_line(column_annotation(&s.ty)),
        PropertyKind::Relation(r) => {
            let hint = if r.kind().is_to_many() {
                TypeHint::new(COLLECTION)
            } else {
                TypeHint::of(r.target(), property.nullable())
            };
            let mut decl = decl.typed(hint);
            for line in relation_annotations(spec, property, r) {
                decl = decl.doc_line(line);
            }
            decl
        }
    }
}

fn column_annotation(ty: &ScalarType) -> String {
    let mut args = vec![format!("type=\"{}\"", ty.storage)];
    if let Some(length) = ty.length() {
        args.push(format!("length={length}"));
    }
    if let Some((precision, scale)) = ty.precision_scale() {
        args.push(format!("precision={precision}"));
        args.push(format!("scale={scale}"));
    }
    for flag in &ty.flags {
        args.push(format!("{flag}=true"));
    }
    if ty.nullable {
        args.push("nullable=true".into());
    }
    format!("@ORM\\Column({})", args.join(", "))
}

fn relation_annotations(
    spec: &SpecificationRecord,
    property: &PropertyDescriptor,
    relation: &RelationDescriptor,
) -> Vec<String> {
    let kind = relation.kind();
    let mut args = vec![format!("targetEntity=\"{}\"", relation.target())];
    match kind {
        RelationKind::OneToMany => {
            args.push(format!("mappedBy=\"{}\"", first_lower(spec.entity_name())))
        }
        _ if relation.bidirectional() => {
            args.push(format!("inversedBy=\"{}\"", inverse_field(spec, kind)))
        }
        _ => {}
    }
    if let Some(cascade) = relation.cascade() {
        args.push(format!("cascade={{\"{cascade}\"}}"));
    }

    let mut lines = vec![format!("@ORM\\{}({})", kind.annotation(), args.join(", "))];
    if kind.is_owning() {
        let mut join = vec![format!("nullable={}", property.nullable())];
        if relation.on_delete_cascade() {
            join.push("onDelete=\"CASCADE\"".into());
        }
        lines.push(format!("@ORM\\JoinColumn({})", join.join(", ")));
    }
    if kind.is_to_many() {
        lines.push(format!("@var Collection|{}[]", relation.target().name()));
    }
    lines
}

/// Name of the property on the other side of a bidirectional relation.
fn inverse_field(spec: &SpecificationRecord, kind: RelationKind) -> String {
    let singular = first_lower(spec.entity_name());
    match kind {
        RelationKind::OneToOne => singular,
        _ => format!("{singular}s"),
    }
}

fn assign_from_data(spec: &SpecificationRecord) -> Vec<String> {
    let mut lines = Vec::new();
    for property in spec.properties() {
        let name = property.name();
        if property.is_to_many() {
            lines.push(format!("$this->{name}->clear();"));
            lines.push(format!("foreach ($data->{name} as $item) {{"));
            lines.push(format!("\t$this->{name}->add($item);"));
            lines.push("}".into());
        } else {
            lines.push(format!("$this->{name} = $data->{name};"));
        }
    }
    lines
}

fn export_to_data(spec: &SpecificationRecord) -> Vec<String> {
    let mut lines = vec![format!("$data = new {}();", spec.data_class().name())];
    for property in spec.properties() {
        let name = property.name();
        if property.is_to_many() {
            lines.push(format!("$data->{name} = $this->{name}->toArray();"));
        } else {
            lines.push(format!("$data->{name} = $this->{name};"));
        }
    }
    lines.push(String::new());
    lines.push("return $data;".into());
    lines
}

fn getter(property: &PropertyDescriptor) -> MethodDecl {
    let name = property.name();
    let method = MethodDecl::public(format!("get{}", first_upper(name))).returns(value_hint(property));
    match property.as_relation() {
        Some(r) if r.kind().is_to_many() => method
            .doc_line(format!("@return {}[]", r.target().name()))
            .line(format!("return $this->{name}->toArray();")),
        _ => method.line(format!("return $this->{name};")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generators::fixtures;
    use crate::domain::source::Import;

    fn property<'a>(unit: &'a SourceUnit, name: &str) -> &'a PropertyDecl {
        unit.declaration
            .properties
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing property {name}"))
    }

    #[test]
    fn integer_id_is_generated_value() {
        let unit = generate(&fixtures::user());
        let id = property(&unit, "id");
        assert_eq!(id.type_hint, Some(TypeHint::new("int")));
        assert_eq!(
            id.doc,
            ["@ORM\\Id", "@ORM\\Column(type=\"integer\")", "@ORM\\GeneratedValue"]
        );
        assert_eq!(unit.declaration.doc, ["@ORM\\Entity"]);
        assert!(unit.imports.contains(&Import::aliased(ORM_MAPPING, "ORM")));
    }

    #[test]
    fn columns_carry_length_flags_and_nullability() {
        let unit = generate(&fixtures::user());
        assert_eq!(
            property(&unit, "email").doc,
            ["@ORM\\Column(type=\"string\", length=255, unique=true)"]
        );
        let age = property(&unit, "age");
        assert_eq!(age.doc, ["@ORM\\Column(type=\"integer\", nullable=true)"]);
        assert_eq!(age.type_hint, Some(TypeHint::nullable("int")));
    }

    #[test]
    fn many_to_one_with_delete_cascade() {
        let unit = generate(&fixtures::book());
        assert_eq!(
            property(&unit, "author").doc,
            [
                "@ORM\\ManyToOne(targetEntity=\"App\\Model\\Author\\Author\")",
                "@ORM\\JoinColumn(nullable=true, onDelete=\"CASCADE\")",
            ]
        );
        assert_eq!(
            property(&unit, "author").type_hint,
            Some(TypeHint::nullable("App\\Model\\Author\\Author"))
        );
    }

    #[test]
    fn many_to_many_is_a_collection_without_join_column() {
        let unit = generate(&fixtures::book());
        let tags = property(&unit, "tags");
        assert_eq!(tags.type_hint, Some(TypeHint::new(COLLECTION)));
        assert_eq!(
            tags.doc,
            [
                "@ORM\\ManyToMany(targetEntity=\"App\\Model\\Tag\\Tag\")",
                "@var Collection|Tag[]",
            ]
        );

        let constructor = unit.declaration.method("__construct").unwrap();
        assert_eq!(
            constructor.body,
            [
                "$this->id = $id;",
                "$this->tags = new ArrayCollection();",
                "$this->edit($data);"
            ]
        );
        let get_tags = unit.declaration.method("getTags").unwrap();
        assert_eq!(get_tags.return_type, Some(TypeHint::new("array")));
        assert_eq!(get_tags.body, ["return $this->tags->toArray();"]);
    }

    #[test]
    fn uuid_strategy_takes_id_in_constructor() {
        let unit = generate(&fixtures::book());
        let id = property(&unit, "id");
        assert_eq!(id.doc, ["@ORM\\Id", "@ORM\\Column(type=\"uuid_binary\")"]);
        let constructor = unit.declaration.method("__construct").unwrap();
        assert_eq!(constructor.params[0].name, "id");
        assert_eq!(constructor.params[1].name, "data");
    }

    #[test]
    fn traits_are_used_and_imported() {
        let unit = generate(&fixtures::book());
        assert_eq!(unit.declaration.traits, ["App\\Model\\Attribute\\Timestampable"]);
        assert!(unit
            .imports
            .contains(&Import::new("App\\Model\\Attribute\\Timestampable")));
        assert!(unit.imports.contains(&Import::new("DateTime")));
    }

    #[test]
    fn without_edit_the_constructor_assigns_directly() {
        use crate::domain::value_objects::Features;
        let spec = crate::domain::entities::SpecificationRecord::builder("App\\Model", "User")
            .property(fixtures::scalar("email", "string", None))
            .features(Features::none())
            .build()
            .unwrap();
        let unit = generate(&spec);
        assert!(unit.declaration.method("edit").is_none());
        assert!(unit.declaration.method("getData").is_none());
        assert_eq!(
            unit.declaration.method("__construct").unwrap().body,
            ["$this->email = $data->email;"]
        );
    }

    #[test]
    fn edit_and_get_data_round_trip_every_property() {
        let unit = generate(&fixtures::user());
        assert_eq!(
            unit.declaration.method("edit").unwrap().body,
            ["$this->email = $data->email;", "$this->age = $data->age;"]
        );
        assert_eq!(
            unit.declaration.method("getData").unwrap().body,
            [
                "$data = new UserData();",
                "$data->email = $this->email;",
                "$data->age = $this->age;",
                "",
                "return $data;"
            ]
        );
    }

    #[test]
    fn bidirectional_and_inverse_sides() {
        use crate::domain::common::QualifiedName;
        use crate::domain::entities::{PropertyDescriptor, RelationDescriptor};
        use crate::domain::value_objects::Cascade;

        let owner = RelationDescriptor::builder(
            RelationKind::ManyToOne,
            QualifiedName::new("App\\Model", "Team"),
        )
        .bidirectional(true)
        .cascade(Some(Cascade::Persist))
        .build();
        let members = RelationDescriptor::builder(
            RelationKind::OneToMany,
            QualifiedName::new("App\\Model", "Badge"),
        )
        .build();
        let spec = crate::domain::entities::SpecificationRecord::builder("App\\Model", "User")
            .property(PropertyDescriptor::relation("team", "Team", false, owner).unwrap())
            .property(PropertyDescriptor::relation("badges", "Badge", false, members).unwrap())
            .build()
            .unwrap();
        let unit = generate(&spec);
        assert_eq!(
            property(&unit, "team").doc,
            [
                "@ORM\\ManyToOne(targetEntity=\"App\\Model\\Team\", inversedBy=\"users\", cascade={\"persist\"})",
                "@ORM\\JoinColumn(nullable=false)",
            ]
        );
        assert_eq!(
            property(&unit, "badges").doc[0],
            "@ORM\\OneToMany(targetEntity=\"App\\Model\\Badge\", mappedBy=\"user\")"
        );
    }
}
