//! Session relay between hosts.

use hostnet_kernel::{Network, NetworkConfig, Sequential, SessionId, SessionState};
use rstest::rstest;

async fn two_hosts() -> (Network, String, String) {
    let net = Network::new().with_address_generator(Sequential::default());
    let a = net.add_host("alice", "password1").await.unwrap();
    let b = net.add_host("bob", "password2").await.unwrap();
    (net, a, b)
}

#[tokio::test]
async fn test_commands_run_on_remote_until_disconnect() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&b, "mkdir bobs-files").await;

    assert!(net.dispatch(&a, &format!("connect {b}")).await.ok());
    assert_eq!(net.dispatch(&a, "ip").await.out, b);
    assert_eq!(net.dispatch(&a, "ls").await.out, "system\nbobs-files");
    assert!(net.dispatch(&a, "touch from-alice.txt").await.ok());

    assert!(net.dispatch(&a, "disconnect").await.ok());
    assert_eq!(net.dispatch(&a, "ip").await.out, a);
    assert_eq!(net.dispatch(&a, "ls").await.out, "system");
    assert_eq!(net.dispatch(&b, "ls").await.out, "system\nbobs-files\nfrom-alice.txt");
}

#[tokio::test]
async fn test_guest_session_is_closed_on_disconnect() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&a, &format!("connect {b}")).await;
    let guests = net
        .with_host(&b, |host| host.sessions().filter(|s| s.is_guest(&b)).count())
        .await
        .unwrap();
    assert_eq!(guests, 1);

    net.dispatch(&a, "disconnect").await;
    let guests = net.with_host(&b, |host| host.sessions().count()).await.unwrap();
    assert_eq!(guests, 1);
}

#[tokio::test]
async fn test_remote_cursor_is_independent() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&b, "mkdir work").await;
    net.dispatch(&a, &format!("connect {b}")).await;
    net.dispatch(&a, "cd work").await;

    assert_eq!(net.dispatch(&a, "pwd").await.out, "/work");
    assert_eq!(net.dispatch(&b, "pwd").await.out, "/");
}

#[rstest]
#[case::unknown_host("connect 192.168.0.1", "host not found")]
#[case::disconnect_when_local("disconnect", "not connected")]
#[tokio::test]
async fn test_connect_failures(#[case] line: &str, #[case] expected: &str) {
    let (net, a, _) = two_hosts().await;
    let result = net.dispatch(&a, line).await;
    assert_eq!(result.code, 1);
    assert!(result.err.contains(expected), "{}", result.err);
    let state = net
        .with_host(&a, |host| host.main_session().map(|s| s.state()))
        .await
        .unwrap();
    assert_eq!(state, Some(SessionState::Local));
}

#[tokio::test]
async fn test_self_connect_is_refused() {
    let (net, a, _) = two_hosts().await;
    let result = net.dispatch(&a, &format!("connect {a}")).await;
    assert!(result.err.contains("itself"));
}

#[tokio::test]
async fn test_guest_cannot_chain_connections() {
    let (net, a, b) = two_hosts().await;
    let c = net.add_host("carol", "password3").await.unwrap();
    net.dispatch(&a, &format!("connect {b}")).await;

    let result = net.dispatch(&a, &format!("connect {c}")).await;
    assert_eq!(result.code, 1);
    assert!(result.err.contains("guest"));
    assert_eq!(net.dispatch(&a, "ip").await.out, b);
}

#[tokio::test]
async fn test_corrupted_remote_drops_the_connection() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&a, &format!("connect {b}")).await;
    net.dispatch(&b, "rm /system/system.dat").await;

    let result = net.dispatch(&a, "ls").await;
    assert_eq!(result.code, 1);
    assert!(result.err.contains("corrupted"));

    // Back on the local host.
    assert_eq!(net.dispatch(&a, "ip").await.out, a);
    let sessions = net.with_host(&b, |host| host.sessions().count()).await.unwrap();
    assert_eq!(sessions, 1);
}

#[tokio::test]
async fn test_corrupted_local_host_blocks_relay() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&a, "rm /system").await;
    assert!(net.dispatch(&a, &format!("connect {b}")).await.err.contains("corrupted"));
}

#[tokio::test]
async fn test_removing_remote_host_drops_relay() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&a, &format!("connect {b}")).await;
    net.remove_host(&b).await.unwrap();

    assert_eq!(net.dispatch(&a, "ip").await.out, a);
    assert_eq!(net.prompt(&a).await.unwrap(), "alice:/$ ");
}

#[tokio::test]
async fn test_removing_caller_closes_its_guest_sessions() {
    let (net, a, b) = two_hosts().await;
    net.dispatch(&a, &format!("connect {b}")).await;
    net.remove_host(&a).await.unwrap();

    let sessions: Vec<SessionId> = net
        .with_host(&b, |host| host.sessions().map(|s| s.id()).collect())
        .await
        .unwrap();
    assert_eq!(sessions, vec![SessionId::MAIN]);
}

#[tokio::test]
async fn test_cross_connected_hosts_run_concurrently() {
    let net = std::sync::Arc::new(Network::with_config(NetworkConfig::default()).with_address_generator(Sequential::default()));
    let a = net.add_host("alice", "password1").await.unwrap();
    let b = net.add_host("bob", "password2").await.unwrap();
    net.dispatch(&a, &format!("connect {b}")).await;
    net.dispatch(&b, &format!("connect {a}")).await;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let net = net.clone();
        let from = if i % 2 == 0 { a.clone() } else { b.clone() };
        tasks.push(tokio::spawn(async move { net.dispatch(&from, &format!("touch f{i}")).await }));
    }
    for task in tasks {
        assert!(task.await.unwrap().ok());
    }

    // Each host received the other's files.
    let on_a = net.with_host(&a, |h| h.tree().len()).await.unwrap();
    let on_b = net.with_host(&b, |h| h.tree().len()).await.unwrap();
    assert_eq!(on_a, 3 + 10);
    assert_eq!(on_b, 3 + 10);
}
