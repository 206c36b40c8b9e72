use std::path::Path;

use dfimage::core::ImageReference;
use dfimage::docker::{DockerClient, ImageStore, DEFAULT_TIMEOUT_SECS};
use dfimage::Inspector;

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn test_reconstruct_first_tagged_image() {
    let client = DockerClient::with_socket(Path::new("/var/run/docker.sock"), DEFAULT_TIMEOUT_SECS)
        .await
        .unwrap();
    let images = ImageStore::list_images(&client).await.unwrap();

    let Some(tag) = images
        .iter()
        .find_map(|i| i.primary_reference().map(str::to_string))
    else {
        println!("No tagged images found");
        return;
    };

    let inspector = Inspector::new(client);
    let result = inspector
        .reconstruct(&ImageReference::parse(&tag))
        .await
        .unwrap();

    let from = result.dockerfile.from_line().unwrap();
    assert!(from.starts_with("FROM "));
    println!("{}", result.dockerfile);
}
