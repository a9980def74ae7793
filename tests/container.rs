use async_trait::async_trait;
use bytes::Bytes;
use cloudfiles_rs::{
    CfClient, CfConfig, CfContainer, CfRequest, CfResponse, Error, Transport, UserCredentials,
};
use hyper::{body::to_bytes, Method, StatusCode};
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

#[derive(Debug)]
struct Recorded {
    method: Method,
    uri: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

#[derive(Default)]
struct Inner {
    responses: Mutex<VecDeque<CfResponse>>,
    requests: Mutex<Vec<Recorded>>,
}

/// 按顺序返回预设响应并记录收到的请求，预设响应用完后返回200
#[derive(Clone, Default)]
struct StubTransport {
    inner: Arc<Inner>,
}

impl StubTransport {
    fn respond(&self, response: CfResponse) -> &Self {
        self.inner.responses.lock().unwrap().push_back(response);
        self
    }
    fn status(&self, status: StatusCode) -> &Self {
        self.respond(CfResponse::new(status))
    }
    fn requests(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        self.inner.requests.lock().unwrap()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: CfRequest) -> Result<CfResponse, Error> {
        let method = request.method.clone();
        let uri = request.uri();
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
            .collect();
        let body = to_bytes(request.body).await?;
        self.inner.requests.lock().unwrap().push(Recorded {
            method,
            uri,
            headers,
            body,
        });
        let response = self.inner.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| CfResponse::new(StatusCode::OK)))
    }
}

fn config() -> CfConfig {
    CfConfig::new()
        .set_storage_url("https://storage.example.com/v1/acct")
        .set_cdn_management_url("https://cdn.example.com/v1/acct")
        .set_credentials(
            UserCredentials::new()
                .set_auth_token("auth-token")
                .set_storage_token("storage-token"),
        )
}

fn container(stub: &StubTransport) -> CfContainer<StubTransport> {
    CfContainer::new("photos", stub.clone()).with_config(config())
}

fn meta(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn photos_scenario() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    let cat = photos.add_object_with_meta("cat.png", HashMap::new()).await.unwrap();
    assert_eq!(cat.name(), "cat.png");
    assert!(photos.object_exists("cat.png").await.unwrap());

    photos.delete_object("cat.png").await.unwrap();
    assert!(photos.objects().is_empty());
    assert!(matches!(
        photos.delete_object("cat.png").await,
        Err(Error::StorageItemNotFound)
    ));
}

#[tokio::test]
async fn empty_names_fail_before_any_request() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    assert!(matches!(
        photos.add_object("").await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        photos.add_object_with_meta("", meta(&[("a", "b")])).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        photos.add_object_from_stream(&b"data"[..], "").await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        photos.add_object_from_bytes("data", "", HashMap::new()).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        photos.delete_object("").await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        photos.object_exists("").await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn missing_configuration_fails_before_any_request() {
    let stub = StubTransport::default();
    let mut photos = CfContainer::new("photos", stub.clone());

    assert!(matches!(
        photos.add_object("cat.png").await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        photos.mark_as_public().await,
        Err(Error::InvalidArgument(_))
    ));

    photos.set_config(CfConfig::new().set_storage_url("https://storage.example.com/v1/acct"));
    assert!(matches!(
        photos.object_exists("cat.png").await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn add_object_keeps_first_cache_entry() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    photos
        .add_object_with_meta("cat.png", meta(&[("Author", "alice")]))
        .await
        .unwrap();
    let second = photos
        .add_object_with_meta("cat.png", meta(&[("Author", "bob")]))
        .await
        .unwrap();

    assert_eq!(second.meta_tags()["Author"], "bob");
    assert_eq!(photos.objects().len(), 1);
    assert_eq!(photos.objects()[0].meta_tags()["Author"], "alice");
    assert_eq!(stub.requests().len(), 2);
}

#[tokio::test]
async fn add_object_request_shape() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    photos
        .add_object_from_bytes("hello", "greeting.txt", meta(&[("Author", "alice")]))
        .await
        .unwrap();

    let requests = stub.requests();
    let put = &requests[0];
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.uri, "https://storage.example.com/v1/acct/photos/greeting.txt");
    assert_eq!(put.headers["x-storage-token"], "storage-token");
    assert_eq!(put.headers["x-object-meta-author"], "alice");
    assert_eq!(put.headers["etag"], "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(put.headers["content-type"], "text/plain");
    assert_eq!(put.body, Bytes::from_static(b"hello"));
}

#[tokio::test]
async fn invalid_metadata_key_is_rejected() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    assert!(matches!(
        photos
            .add_object_with_meta("cat.png", meta(&[("bad key", "x")]))
            .await,
        Err(Error::InvalidCharacter)
    ));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn add_object_uploads_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello").unwrap();

    let stub = StubTransport::default();
    let mut photos = container(&stub);
    let object = photos.add_object(path.to_str().unwrap()).await.unwrap();

    assert_eq!(object.name(), path.to_str().unwrap());
    let requests = stub.requests();
    assert_eq!(requests[0].uri, "https://storage.example.com/v1/acct/photos/notes.txt");
    assert_eq!(requests[0].headers["etag"], "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(requests[0].headers["content-length"], "5");
    assert_eq!(requests[0].body, Bytes::from_static(b"hello"));
}

#[tokio::test]
async fn add_object_from_stream_sends_stream_body() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);
    let uploaded = Arc::new(Mutex::new(0u64));
    let progress = uploaded.clone();
    photos.set_upload_callback(Arc::new(move |size: u64, _total: u64| {
        *progress.lock().unwrap() = size;
    }));

    let object = photos
        .add_object_from_stream(&b"streamed bytes"[..], "dir/stream.bin")
        .await
        .unwrap();

    assert_eq!(object.name(), "dir/stream.bin");
    assert_eq!(*uploaded.lock().unwrap(), 14);
    let requests = stub.requests();
    assert_eq!(requests[0].body, Bytes::from_static(b"streamed bytes"));
    assert!(!requests[0].headers.contains_key("etag"));
}

#[tokio::test]
async fn add_object_status_mapping() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    stub.status(StatusCode::BAD_REQUEST);
    assert!(matches!(
        photos.add_object("cat.png").await,
        Err(Error::ContainerNotFound)
    ));
    stub.status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(matches!(
        photos.add_object("cat.png").await,
        Err(Error::InvalidETag)
    ));
    stub.status(StatusCode::INTERNAL_SERVER_ERROR);
    let err = photos.add_object("cat.png").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(photos.objects().is_empty());
}

#[tokio::test]
async fn stream_and_bytes_uploads_share_status_mapping() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    stub.status(StatusCode::BAD_REQUEST);
    assert!(matches!(
        photos.add_object_from_stream(&b"data"[..], "cat.png").await,
        Err(Error::ContainerNotFound)
    ));
    stub.status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(matches!(
        photos.add_object_from_stream(&b"data"[..], "cat.png").await,
        Err(Error::InvalidETag)
    ));
    stub.status(StatusCode::BAD_REQUEST);
    assert!(matches!(
        photos
            .add_object_from_bytes("data", "cat.png", HashMap::new())
            .await,
        Err(Error::ContainerNotFound)
    ));
    stub.status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(matches!(
        photos
            .add_object_from_bytes("data", "cat.png", HashMap::new())
            .await,
        Err(Error::InvalidETag)
    ));
    assert!(photos.objects().is_empty());
    assert_eq!(stub.requests().len(), 4);
}

#[tokio::test]
async fn nested_name_is_cached_as_given() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    let cat = photos
        .add_object_from_bytes("x", "2023/cat.png", HashMap::new())
        .await
        .unwrap();
    assert_eq!(cat.name(), "2023/cat.png");
    assert!(photos.object_exists("2023/cat.png").await.unwrap());
    photos.delete_object("2023/cat.png").await.unwrap();
    assert!(photos.objects().is_empty());

    let requests = stub.requests();
    assert_eq!(requests[0].uri, "https://storage.example.com/v1/acct/photos/cat.png");
}

#[tokio::test]
async fn dot_segment_names_are_rejected() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    for name in [".", "..", "photos/.."] {
        assert!(matches!(
            photos.add_object(name).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            photos.add_object_from_stream(&b"data"[..], name).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            photos.delete_object(name).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            photos.object_exists(name).await,
            Err(Error::InvalidArgument(_))
        ));
    }
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn unreadable_local_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, b"hello").unwrap();
    // 以普通文件作为目录访问，读取元信息会失败但不是NotFound
    let path = file.join("cat.png");

    let stub = StubTransport::default();
    let mut photos = container(&stub);
    assert!(matches!(
        photos.add_object(path.to_str().unwrap()).await,
        Err(Error::IoError(_))
    ));
    assert!(stub.requests().is_empty());
    assert!(photos.objects().is_empty());
}

#[tokio::test]
async fn delete_requires_local_cache_entry() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    stub.status(StatusCode::NO_CONTENT);
    assert!(matches!(
        photos.delete_object("dog.png").await,
        Err(Error::StorageItemNotFound)
    ));
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].uri, "https://storage.example.com/v1/acct/photos/dog.png");
}

#[tokio::test]
async fn delete_maps_not_found_and_keeps_cache_on_failure() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);
    photos.add_object("cat.png").await.unwrap();

    stub.status(StatusCode::NOT_FOUND);
    assert!(matches!(
        photos.delete_object("cat.png").await,
        Err(Error::StorageItemNotFound)
    ));
    stub.status(StatusCode::SERVICE_UNAVAILABLE);
    assert!(matches!(
        photos.delete_object("cat.png").await,
        Err(Error::CfError(StatusCode::SERVICE_UNAVAILABLE, _))
    ));
    assert_eq!(photos.objects().len(), 1);
}

#[tokio::test]
async fn exists_is_false_on_not_found() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);
    photos.add_object("cat.png").await.unwrap();

    stub.status(StatusCode::NOT_FOUND);
    assert!(!photos.object_exists("cat.png").await.unwrap());
    assert_eq!(stub.requests()[1].method, Method::HEAD);
}

#[tokio::test]
async fn exists_requires_local_cache_entry() {
    let stub = StubTransport::default();
    let photos = container(&stub);

    stub.status(StatusCode::OK);
    assert!(!photos.object_exists("cat.png").await.unwrap());
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn mark_as_public_unauthorized() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    stub.status(StatusCode::UNAUTHORIZED);
    assert!(matches!(
        photos.mark_as_public().await,
        Err(Error::InvalidCredential)
    ));
    assert_eq!(photos.public_url(), None);
}

// 202 一般表示“已接受、稍后处理”，这里的约定是“容器已经公开”
#[tokio::test]
async fn mark_as_public_accepted_means_already_public() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);

    stub.status(StatusCode::ACCEPTED);
    assert!(matches!(
        photos.mark_as_public().await,
        Err(Error::ContainerAlreadyPublic)
    ));
    assert_eq!(photos.public_url(), None);
}

#[tokio::test]
async fn mark_as_public_sets_public_url() {
    let stub = StubTransport::default();
    let mut photos = container(&stub);
    assert_eq!(photos.public_url(), None);

    let mut response = CfResponse::new(StatusCode::CREATED);
    response.headers.insert(
        "x-cdn-uri",
        "http://c0001.cdn.example.com".parse().unwrap(),
    );
    stub.respond(response);
    photos.mark_as_public().await.unwrap();
    assert_eq!(photos.public_url(), Some("http://c0001.cdn.example.com"));

    {
        let requests = stub.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].uri, "https://cdn.example.com/v1/acct/photos");
        assert_eq!(requests[0].headers["x-auth-token"], "auth-token");
        assert_eq!(requests[0].headers["x-cdn-enabled"], "True");
    }

    let cat = photos.add_object("cat.png").await.unwrap();
    assert_eq!(cat.public_url(), Some("http://c0001.cdn.example.com"));
}

#[tokio::test]
async fn list_remote_objects_leaves_cache_alone() {
    let stub = StubTransport::default();
    let photos = container(&stub);

    let mut response = CfResponse::new(StatusCode::OK);
    response.body = Bytes::from_static(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<container name="photos">
  <object>
    <name>cat.png</name>
    <hash>4281c348eaf83e70ddce0e07221c3d28</hash>
    <bytes>14</bytes>
    <content_type>image/png</content_type>
    <last_modified>2009-02-03T05:26:32.612278</last_modified>
  </object>
</container>"#,
    );
    stub.respond(response);

    let listed = photos
        .list_remote_objects()
        .set_prefix("c")
        .set_limit(10)
        .send()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "cat.png");
    assert!(photos.objects().is_empty());
    assert_eq!(
        stub.requests()[0].uri,
        "https://storage.example.com/v1/acct/photos?format=xml&prefix=c&limit=10"
    );
}

#[tokio::test]
async fn client_hands_out_configured_containers() {
    let stub = StubTransport::default();
    let client = CfClient::with_transport(config(), stub.clone());

    let mut first = client.container("photos");
    let second = client.container("photos");
    assert_eq!(first.config(), client.config());

    first.add_object("cat.png").await.unwrap();
    assert_eq!(first.objects().len(), 1);
    assert!(second.objects().is_empty());
}
