use autopulse::model::Article;
use autopulse::store::article_store::LoadSource;
use autopulse::store::fs::FileStorage;
use autopulse::store::{ArticleStorage, ArticleStore};
use std::fs;

fn article(id: &str, title: &str) -> Article {
    serde_json::from_str(&format!(r#"{{"id":"{}","title":"{}"}}"#, id, title)).unwrap()
}

#[test]
fn seed_is_persisted_on_first_load() {
    let dir = tempfile::tempdir().unwrap();

    let store = ArticleStore::initialize(FileStorage::new(dir.path().to_path_buf()));
    assert_eq!(store.source(), LoadSource::Seed);
    assert!(!store.list().is_empty());

    let reloaded = ArticleStore::initialize(FileStorage::new(dir.path().to_path_buf()));
    assert_eq!(reloaded.source(), LoadSource::Persisted);
    assert_eq!(reloaded.list(), store.list());
}

#[test]
fn mutations_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let storage = || FileStorage::new(dir.path().to_path_buf()).with_storage_key("posts");

    let mut store = ArticleStore::initialize(storage());
    store.replace_all(vec![article("1", "One")]).unwrap();
    store.add(article("2", "Two")).unwrap();

    let mut edited = article("1", "One, edited");
    edited.published = true;
    assert!(store.update(edited).unwrap());

    let reloaded = ArticleStore::initialize(storage());
    let titles: Vec<_> = reloaded.list().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Two", "One, edited"]);
    assert!(dir.path().join("posts.json").exists());
}

#[test]
fn persisted_empty_collection_wins_over_seed() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().to_path_buf());
    storage.persist(&[]).unwrap();

    let store = ArticleStore::initialize(storage);
    assert_eq!(store.source(), LoadSource::Persisted);
    assert!(store.list().is_empty());
}

#[test]
fn corrupt_data_degrades_to_empty_without_overwriting() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("autopulse_posts.json");
    fs::write(&data_file, "{ not json").unwrap();

    let store = ArticleStore::initialize(FileStorage::new(dir.path().to_path_buf()));
    assert_eq!(store.source(), LoadSource::Empty);
    assert!(store.list().is_empty());
    assert_eq!(fs::read_to_string(&data_file).unwrap(), "{ not json");
}

#[test]
fn custom_seed_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let seed = dir.path().join("seed.json");
    fs::write(&seed, r#"[{"id":"s1","title":"Seeded"}]"#).unwrap();

    let store = ArticleStore::initialize(
        FileStorage::new(dir.path().join("data")).with_seed_path(Some(seed)),
    );
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].id, "s1");
}
