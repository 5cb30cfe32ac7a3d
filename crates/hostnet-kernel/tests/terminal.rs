//! Terminal behavior on a single host, driven through `Network::dispatch`.

use hostnet_kernel::{Network, NodeDescription, Sequential};
use rstest::rstest;

async fn network_with_host() -> (Network, String) {
    let net = Network::new().with_address_generator(Sequential::default());
    let address = net.add_host("alice", "password1").await.unwrap();
    (net, address)
}

#[tokio::test]
async fn test_fresh_host_has_integrity_marker() {
    let (net, a) = network_with_host().await;
    assert_eq!(net.dispatch(&a, "tree").await.out, "system/\n  system.dat");
    net.with_host(&a, |host| assert!(host.verify_integrity().is_ok()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_touch_then_cat_is_empty() {
    let (net, a) = network_with_host().await;
    assert!(net.dispatch(&a, "touch notes.txt").await.ok());
    let result = net.dispatch(&a, "cat notes.txt").await;
    assert_eq!(result.code, 0);
    assert_eq!(result.out, "");
}

#[tokio::test]
async fn test_mkdir_never_creates_intermediate_directories() {
    let (net, a) = network_with_host().await;
    let result = net.dispatch(&a, r#"mkdir "a/b/""#).await;
    assert_eq!(result.code, 1);
    assert!(net.dispatch(&a, "ls").await.out.lines().all(|l| l != "a"));
}

#[tokio::test]
async fn test_mv_trailing_slash_forbids_creation() {
    let (net, a) = network_with_host().await;
    net.dispatch(&a, "mkdir a").await;
    let result = net.dispatch(&a, "mv a b/").await;
    assert_eq!(result.code, 1);
    assert_eq!(net.dispatch(&a, "ls").await.out, "system\na");
}

#[tokio::test]
async fn test_deleting_marker_corrupts_host() {
    let (net, a) = network_with_host().await;
    assert!(net.dispatch(&a, "rm system/system.dat").await.ok());

    let result = net.dispatch(&a, "echo still here?").await;
    assert_eq!(result.code, 1);
    assert!(result.err.contains("corrupted"));

    net.repair(&a).await.unwrap();
    assert_eq!(net.dispatch(&a, "echo back").await.out, "back");
}

#[tokio::test]
async fn test_session_cursor_survives_commands() {
    let (net, a) = network_with_host().await;
    net.dispatch(&a, "mkdir projects").await;
    net.dispatch(&a, "cd projects").await;
    net.dispatch(&a, "mkdir game").await;
    net.dispatch(&a, "cd game").await;
    assert_eq!(net.dispatch(&a, "pwd").await.out, "/projects/game");
    assert_eq!(net.prompt(&a).await.unwrap(), "alice:/projects/game$ ");

    // Removing the directory under the cursor sends it home.
    net.dispatch(&a, "rm /projects").await;
    assert_eq!(net.dispatch(&a, "pwd").await.out, "/");
}

#[tokio::test]
async fn test_workflow_with_quotes() {
    let (net, a) = network_with_host().await;
    for line in [
        "mkdir docs",
        "touch docs/letter.txt",
        r#"write docs/letter.txt "Dear Bob, the password is swordfish.""#,
        "replace docs/letter.txt swordfish hunter2",
        "cp docs archive",
        "mv archive/letter.txt archive/old.txt",
    ] {
        let result = net.dispatch(&a, line).await;
        assert!(result.ok(), "{line}: {}", result.err);
    }
    assert_eq!(
        net.dispatch(&a, "cat docs/letter.txt").await.out,
        "Dear Bob, the password is hunter2."
    );
    assert_eq!(
        net.dispatch(&a, "tree").await.out,
        "system/\n  system.dat\ndocs/\n  letter.txt\narchive/\n  old.txt"
    );
}

#[rstest]
#[case("cat", "Syntax: cat <path>")]
#[case("mv onlyone", "Syntax: mv <oldpath> <newpath>")]
#[case("cp", "Syntax: cp <source> <destination>")]
#[case("write f", "Syntax: write <file> <text|file>")]
#[case("replace f a", "Syntax: replace <file> <old> <new> [count]")]
#[case("connect", "Syntax: connect <address>")]
#[case("echo \"unterminated", "unterminated quote")]
#[tokio::test]
async fn test_bad_arguments(#[case] line: &str, #[case] expected: &str) {
    let (net, a) = network_with_host().await;
    let result = net.dispatch(&a, line).await;
    assert_eq!(result.code, 1);
    assert!(result.err.contains(expected), "{line}: {}", result.err);
}

#[rstest]
#[case("mkdir a<b")]
#[case("mkdir a:b")]
#[case("touch what?")]
#[case("touch star*")]
#[case("mkdir pipe|name")]
#[tokio::test]
async fn test_invalid_names_are_rejected(#[case] line: &str) {
    let (net, a) = network_with_host().await;
    let result = net.dispatch(&a, line).await;
    assert!(result.err.contains("not a valid name"), "{line}: {}", result.err);
    assert_eq!(net.dispatch(&a, "ls").await.out, "system");
}

#[tokio::test]
async fn test_host_from_description_round_trips() {
    let net = Network::new().with_address_generator(Sequential::default());
    let description = vec![
        NodeDescription::directory("home", vec![NodeDescription::text("todo.txt", "ship it")]),
        NodeDescription::bytes("blob.bin", vec![0xde, 0xad, 0xbe, 0xef]),
    ];
    let a = net
        .add_host_with_tree("alice", "password1", &description)
        .await
        .unwrap();
    assert_eq!(net.dispatch(&a, "cat home/todo.txt").await.out, "ship it");
    assert!(net.dispatch(&a, "replace blob.bin a b").await.err.contains("not text"));

    let exported = net
        .with_host(&a, |host| hostnet_kernel::vfs::describe(host.tree()))
        .await
        .unwrap();
    assert_eq!(&exported[..2], &description[..]);
    assert_eq!(exported[2].name, "system");
}
