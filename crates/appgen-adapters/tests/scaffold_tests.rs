//! End-to-end tests: model definition → record → rendered PHP on disk.

use std::path::{Path, PathBuf};

use appgen_adapters::{
    LocalFilesystem, MemoryFilesystem, ModelDefinitionLoader, PhpRenderer, StaticNamespaceResolver,
};
use appgen_core::{
    application::{
        ApplicationError, DefaultInput, GeneratorSettings, ModelInput, ModelService, PropertyInput,
        RelationInput, ScaffoldService,
    },
    domain::{ArtifactKind, DomainError, IdentifierStrategy, QualifiedName, SpecificationRecord},
    error::AppGenError,
};
use tempfile::TempDir;

fn models() -> ModelService {
    let resolver = StaticNamespaceResolver::new()
        .with(QualifiedName::new("App\\Model\\Author", "Author"))
        .with(QualifiedName::new("App\\Model\\Tag", "Tag"));
    ModelService::new(Box::new(resolver), GeneratorSettings::default())
}

fn scaffold(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(Box::new(PhpRenderer::new()), Box::new(fs.clone()))
}

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(Path::new(path))
        .unwrap_or_else(|| panic!("{path} was not written; have {:?}", fs.list_files()))
}

fn user_input() -> ModelInput {
    let mut input = ModelInput::new("App\\Model", "User");
    input.properties.push(PropertyInput::new("email", "string --unique"));
    input.get_by.push("email".into());
    input
}

fn book_input() -> ModelInput {
    let mut input = ModelInput::new("App\\Model\\Book", "Book");
    input.properties.push(PropertyInput::new("title", "string|120"));

    let mut author = PropertyInput::new("author", "?Author");
    author.relation = Some(RelationInput {
        kind: "M:1".into(),
        bidirectional: false,
        cascade: None,
        on_delete_cascade: true,
    });
    input.properties.push(author);

    let mut tags = PropertyInput::new("tags", "Tag");
    tags.relation = Some(RelationInput {
        kind: "N:M".into(),
        on_delete_cascade: true,
        ..RelationInput::default()
    });
    input.properties.push(tags);

    input.get_all_by.push("author".into());
    input
}

#[test]
fn scalar_single_lookup_repository() {
    let fs = MemoryFilesystem::new();
    let spec = models().assemble(&user_input()).unwrap();
    let report = scaffold(&fs).scaffold(&spec, "app").unwrap();

    assert_eq!(report.files[0].artifact, ArtifactKind::Entity);
    assert_eq!(report.files[0].path, PathBuf::from("app/Model/User.php"));

    let repository = read(&fs, "app/Model/UserRepository.php");
    assert!(repository.starts_with("<?php\n\ndeclare(strict_types=1);\n\nnamespace App\\Model;\n"));
    assert!(repository.contains("abstract class UserRepository\n"));
    assert!(repository.contains("\tpublic function get(int $id): User\n"));
    assert!(repository.contains("\tpublic function getByEmail(string $email): User\n"));
    assert!(repository.contains("\t\t\t'email' => $email\n"));
    assert!(repository.contains("\t\t\tthrow new UserNotFoundException();\n"));
    assert!(repository.contains("\tpublic function getAll(): array\n"));
    assert!(repository.contains("\tprivate function getQueryBuilderForAll(): QueryBuilder\n"));
    assert!(repository.contains("\tpublic function getQueryBuilderForDataGrid(): QueryBuilder\n"));
    assert!(repository.contains("use App\\Model\\Exception\\UserNotFoundException;\n"));

    let not_found = read(&fs, "app/Model/Exception/UserNotFoundException.php");
    assert!(not_found.contains("parent::__construct('User not found.');"));
}

#[test]
fn many_to_one_multi_lookup_and_coerced_many_to_many() {
    let fs = MemoryFilesystem::new();
    let spec = models().assemble(&book_input()).unwrap();
    scaffold(&fs).scaffold(&spec, "app").unwrap();

    let entity = read(&fs, "app/Model/Book/Book.php");
    assert!(entity.contains("@ORM\\ManyToOne(targetEntity=\"App\\Model\\Author\\Author\")"));
    assert!(entity.contains("@ORM\\JoinColumn(nullable=true, onDelete=\"CASCADE\")"));
    assert!(entity.contains("\tprivate ?Author $author;\n"));
    assert!(entity.contains("@ORM\\ManyToMany(targetEntity=\"App\\Model\\Tag\\Tag\")"));
    assert!(entity.contains("\tprivate Collection $tags;\n"));
    assert_eq!(entity.matches("onDelete").count(), 1);

    let repository = read(&fs, "app/Model/Book/BookRepository.php");
    assert!(repository.contains("\tpublic function getAllByAuthor(int $authorId): array\n"));
    assert!(repository.contains("\t\treturn $this->getRepository()->findBy([\n"));
    assert!(repository.contains("\t\t\t'author' => $authorId\n"));
}

#[test]
fn output_is_blank_line_normalized_and_deterministic() {
    let spec = models().assemble(&book_input()).unwrap();
    let first = scaffold(&MemoryFilesystem::new()).plan(&spec, "app").unwrap();
    let second = scaffold(&MemoryFilesystem::new()).plan(&spec, "app").unwrap();

    assert_ne!(first.run_id(), second.run_id());
    let a: Vec<_> = first.files().map(|f| (&f.path, &f.content)).collect();
    let b: Vec<_> = second.files().map(|f| (&f.path, &f.content)).collect();
    assert_eq!(a, b);

    for file in first.files() {
        assert!(!file.content.starts_with('\n'), "{} starts blank", file.path);
        assert!(!file.content.contains("\n\n\n"), "{} has a blank run", file.path);
        assert!(file.content.ends_with("}\n"), "{} is truncated", file.path);
    }
}

#[test]
fn multiline_defaults_survive_normalization() {
    let mut input = user_input();
    let mut bio = PropertyInput::new("bio", "text");
    bio.default = Some(DefaultInput::Text("a\n\n\nb  ".into()));
    input.properties.push(bio);

    let fs = MemoryFilesystem::new();
    let spec = models().assemble(&input).unwrap();
    scaffold(&fs).scaffold(&spec, "app").unwrap();

    let data = read(&fs, "app/Model/UserData.php");
    assert!(data.contains("\tpublic string $bio = \"a\\n\\n\\nb  \";\n"), "{data}");
}

#[test]
fn unknown_lookup_writes_nothing() {
    let fs = MemoryFilesystem::new();
    let mut input = user_input();
    input.get_all_by.push("phone".into());

    let err = models().assemble(&input).unwrap_err();
    assert!(matches!(
        err,
        AppGenError::Domain(DomainError::UnknownProperty(ref name)) if name == "phone"
    ));
    assert!(fs.list_files().is_empty());
}

#[test]
fn failed_write_rolls_back_new_files() {
    let fs = MemoryFilesystem::new();
    let service = scaffold(&fs);
    let spec = models().assemble(&user_input()).unwrap();
    fs.deny_writes_to("app/Model/UserRepository.php").unwrap();

    let err = service.scaffold(&spec, "app").unwrap_err();
    assert!(matches!(
        err,
        AppGenError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert!(fs.list_files().is_empty());
}

#[test]
fn uuid_identifiers_flow_through_every_artifact() {
    let settings = GeneratorSettings {
        id_strategy: "uuid_binary".parse::<IdentifierStrategy>().unwrap(),
        ..GeneratorSettings::default()
    };
    let service = ModelService::new(Box::new(StaticNamespaceResolver::new()), settings);
    let spec: SpecificationRecord = service.assemble(&user_input()).unwrap();

    let fs = MemoryFilesystem::new();
    scaffold(&fs).scaffold(&spec, "app").unwrap();

    let entity = read(&fs, "app/Model/User.php");
    assert!(entity.contains("@ORM\\Column(type=\"uuid_binary\")"));
    assert!(entity.contains("\tprivate UuidInterface $id;\n"));
    let factory = read(&fs, "app/Model/UserFactory.php");
    assert!(factory.contains("Uuid::uuid4(), $data"));
}

#[test]
fn loads_definition_and_writes_to_real_disk() {
    let temp = TempDir::new().unwrap();
    let definition = temp.path().join("user.toml");
    std::fs::write(
        &definition,
        r#"
namespace = "App\\Model\\User"
entity = "User"
get_by = ["email"]
events = ["created"]

[[properties]]
name = "email"
type = "string|255 --unique"
"#,
    )
    .unwrap();

    let input = ModelDefinitionLoader::new().load(&definition).unwrap();
    let spec = models().assemble(&input).unwrap();
    let app_dir = temp.path().join("app");
    let service = ScaffoldService::new(Box::new(PhpRenderer::new()), Box::new(LocalFilesystem::new()));
    let report = service.scaffold(&spec, &app_dir).unwrap();

    assert!(report.paths().all(Path::exists));
    let event = std::fs::read_to_string(app_dir.join("Model/User/Event/UserCreatedEvent.php")).unwrap();
    assert!(event.contains("class UserCreatedEvent extends Event\n"));

    let rerun = service.scaffold(&spec, &app_dir).unwrap();
    assert!(rerun.files.iter().all(|f| f.overwritten));
}
