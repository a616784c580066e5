use std::sync::Arc;

use recovery_targets::recovery::{PolicyType, RecoveryTarget, TargetCatalog};
use recovery_targets::session::SharedSession;
use recovery_targets::services::ServiceTable;
use recovery_targets::{HttpSession, ResponseError, SdkError};

const TOKEN: &str = "QSDK 3f2a9c";

const LIST_BODY: &str = r#"{"recoveryTargets":[
    {"id":1,"name":"Tgt1","applicationType":"REGULAR"},
    {"id":2,"name":"CR","applicationType":"CLEAN_ROOM"},
    {"id":5,"name":"Azure-DR","applicationType":"REPLICATION"}
]}"#;

const AMAZON_BODY: &str = r#"{
    "entity": {
        "applicationType": "REPLICATION",
        "policyType": "AMAZON",
        "destinationHypervisor": {"name": "aws-east"}
    },
    "cloudDestinationOptions": {"availabilityZone": "us-east-1b", "volumeType": "gp2"},
    "destinationOptions": {"dataStore": "not-used", "destinationHost": "not-used"},
    "securityOptions": {"securityGroups": [{"name": "sg-dr"}]},
    "liveMountOptions": {"expirationTime": {"minutesRetainUntil": 4, "daysRetainUntil": 1}}
}"#;

fn session(server: &mockito::ServerGuard) -> SharedSession {
    Arc::new(HttpSession::new(server.url(), TOKEN.to_string()).unwrap())
}

#[tokio::test]
async fn test_catalog_lists_targets_and_skips_clean_room() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/V4/recoveryTargets")
        .match_header("authtoken", TOKEN)
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LIST_BODY)
        .create_async()
        .await;

    let catalog = TargetCatalog::new(session(&server)).await.unwrap();

    list.assert_async().await;
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.targets().get("tgt1").map(String::as_str), Some("1"));
    assert_eq!(catalog.targets().get("azure-dr").map(String::as_str), Some("5"));
    assert!(catalog.contains("TGT1"));
    assert!(!catalog.contains("cr"));
}

#[tokio::test]
async fn test_get_loads_detail_with_known_id() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/V4/recoveryTargets")
        .with_status(200)
        .with_body(LIST_BODY)
        .expect(1)
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/V4/recoveryTargets/1")
        .with_status(200)
        .with_body(AMAZON_BODY)
        .expect(1)
        .create_async()
        .await;

    let catalog = TargetCatalog::new(session(&server)).await.unwrap();
    let target = catalog.get("Tgt1").await.unwrap();

    list.assert_async().await;
    detail.assert_async().await;

    let detail = target.detail();
    assert_eq!(target.policy_type(), PolicyType::Aws);
    assert_eq!(detail.application_type(), Some("REPLICATION"));
    assert_eq!(detail.destination_hypervisor(), Some("aws-east"));
    assert_eq!(detail.availability_zone(), Some("us-east-1b"));
    assert_eq!(detail.volume_type(), Some("gp2"));
    assert_eq!(detail.security_group(), Some("sg-dr"));
    assert_eq!(detail.expiration_time(), Some("4 hours"));

    // Only AWS fields are populated
    assert_eq!(detail.destination_host(), None);
    assert_eq!(detail.vm_folder(), None);
    assert_eq!(detail.storage_account(), None);
    assert_eq!(detail.datastore(), None);
}

#[tokio::test]
async fn test_get_absent_name_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/V4/recoveryTargets")
        .with_status(200)
        .with_body(LIST_BODY)
        .create_async()
        .await;
    let detail = server
        .mock("GET", mockito::Matcher::Regex(r"^/V4/recoveryTargets/\d+$".to_string()))
        .expect(0)
        .create_async()
        .await;

    let catalog = TargetCatalog::new(session(&server)).await.unwrap();
    let err = catalog.get("CR").await.unwrap_err();

    assert!(matches!(err, SdkError::NotFound(ref name) if name == "cr"));
    detail.assert_async().await;
}

#[tokio::test]
async fn test_target_without_id_resolves_through_catalog() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/V4/recoveryTargets")
        .with_status(200)
        .with_body(LIST_BODY)
        .create_async()
        .await;
    server
        .mock("GET", "/V4/recoveryTargets/5")
        .with_status(200)
        .with_body(
            r#"{
                "entity": {"policyType": "AZURE_RESOURCE_MANAGER"},
                "destinationOptions": {"destinationHost": "rg-dr", "dataStore": "stdr01"},
                "cloudDestinationOptions": {"region": {"name": "westeurope"}, "publicIP": false},
                "amazonPolicy": {"vmInstanceTypes": [{"vmInstanceTypeName": "Standard_B1s"}]}
            }"#,
        )
        .create_async()
        .await;

    let target = RecoveryTarget::new(session(&server), "AZURE-DR", None)
        .await
        .unwrap();

    assert_eq!(target.id(), "5");
    assert_eq!(target.policy_type().code(), 7);
    assert_eq!(target.detail().resource_group(), Some("rg-dr"));
    assert_eq!(target.detail().storage_account(), Some("stdr01"));
    assert_eq!(target.detail().region(), Some("westeurope"));
    assert_eq!(target.detail().create_public_ip(), Some(false));
    assert_eq!(target.detail().test_vm_size(), Some("Standard_B1s"));
}

#[tokio::test]
async fn test_vmware_livemount_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/V4/recoveryTargets/40")
        .with_status(200)
        .with_body(
            r#"{
                "entity": {"policyType": "VMW_LIVEMOUNT"},
                "destinationOptions": {"destinationHost": "esx01"},
                "liveMountOptions": {"expirationTime": {"daysRetainUntil": 2}}
            }"#,
        )
        .create_async()
        .await;

    let target = RecoveryTarget::new(session(&server), "lab", Some("40"))
        .await
        .unwrap();

    assert_eq!(target.policy_type(), PolicyType::VMware);
    assert_eq!(target.detail().destination_host(), Some("esx01"));
    assert_eq!(target.detail().expiration_time(), Some("2 days"));
}

#[tokio::test]
async fn test_refresh_twice_yields_identical_state() {
    let mut server = mockito::Server::new_async().await;
    let detail = server
        .mock("GET", "/V4/recoveryTargets/1")
        .with_status(200)
        .with_body(AMAZON_BODY)
        .expect(2)
        .create_async()
        .await;

    let mut target = RecoveryTarget::new(session(&server), "tgt1", Some("1"))
        .await
        .unwrap();
    let first = target.detail().clone();
    let first_properties = target.properties().clone();
    target.refresh().await.unwrap();

    detail.assert_async().await;
    assert_eq!(target.detail(), &first);
    assert_eq!(target.properties(), &first_properties);
}

#[tokio::test]
async fn test_unsuccessful_list_carries_server_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/V4/recoveryTargets")
        .with_status(401)
        .with_body(r#"{"errorCode":5,"errorMessage":"Invalid token"}"#)
        .create_async()
        .await;

    let err = TargetCatalog::new(session(&server)).await.unwrap_err();

    match err {
        SdkError::Response(ResponseError::Unsuccessful { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_gateway_error_page_is_summarized_by_title() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/V4/recoveryTargets")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html><head><title>502 Bad Gateway</title></head><body><hr>nginx</body></html>")
        .create_async()
        .await;

    let err = TargetCatalog::new(session(&server)).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Response was not success (status 502): 502 Bad Gateway"
    );
}

#[tokio::test]
async fn test_empty_detail_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/V4/recoveryTargets/3")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let err = RecoveryTarget::new(session(&server), "x", Some("3"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::Response(ResponseError::Malformed { .. })
    ));
}

#[tokio::test]
async fn test_custom_service_paths() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/v5/targets")
        .with_status(200)
        .with_body(r#"{"recoveryTargets":[]}"#)
        .create_async()
        .await;

    let services = ServiceTable {
        recovery_targets: "/api/v5/targets".to_string(),
        recovery_target: "/api/v5/targets/{id}".to_string(),
    };
    let session: SharedSession = Arc::new(
        HttpSession::new(server.url(), TOKEN.to_string())
            .unwrap()
            .with_services(services),
    );
    let catalog = TargetCatalog::new(session).await.unwrap();

    list.assert_async().await;
    assert!(catalog.is_empty());
}
