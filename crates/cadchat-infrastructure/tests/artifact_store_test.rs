use cadchat_core::dispatch::authorize_download;
use cadchat_core::result::{CadResult, ExportFormat, RenderMode};
use cadchat_infrastructure::ArtifactStore;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_writes_id_and_extension() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path().join("downloads"));
    let result = CadResult::new("a1b2c3", "c1", RenderMode::ThreeD);
    let request = authorize_download(Some(&result), ExportFormat::ThreeMf).unwrap();

    let path = store.save(&request, b"solid").await.unwrap();

    assert_eq!(path, dir.path().join("downloads").join("a1b2c3.3mf"));
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"solid");
}

#[tokio::test]
async fn test_save_replaces_previous_download() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    let result = CadResult::new("s1", "c1", RenderMode::TwoD);
    let request = authorize_download(Some(&result), ExportFormat::Svg).unwrap();

    store.save(&request, b"<svg>old</svg>").await.unwrap();
    let path = store.save(&request, b"<svg/>").await.unwrap();

    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"<svg/>");
}
