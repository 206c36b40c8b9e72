use std::path::Path;

use dfimage::docker::{DockerClient, ImageStore, DEFAULT_TIMEOUT_SECS};

async fn connect() -> DockerClient {
    DockerClient::with_socket(Path::new("/var/run/docker.sock"), DEFAULT_TIMEOUT_SECS)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn test_socket_connection() {
    let client = connect().await;
    let info = client.connection_info();
    assert_eq!(info.host, "unix:///var/run/docker.sock");
    assert!(!info.api_version.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn test_layers_and_history_of_listed_images() {
    let client = connect().await;
    let images = ImageStore::list_images(&client).await.unwrap();

    for image in images.iter().take(3) {
        let layers = client.image_layers(&image.id).await.unwrap();
        assert!(!layers.is_empty(), "{} should have layers", image.id);

        let history = client.image_history(&image.id).await.unwrap();
        assert!(!history.is_empty(), "{} should have history", image.id);
    }
}
