//! End-to-end tests of the WebSocket event flow against an in-process server.

mod common;

use common::{TestClient, sorted, spawn_server};
use kaiwa_shared::protocol::{
    ChatMessagePayload, ClientEvent, ErrorCode, PresencePayload, ServerEvent, TypingPayload,
};

#[tokio::test]
async fn test_first_join_is_echoed_to_sender() {
    // テスト項目: A が alice として join すると A に userJoined{alice, [alice]} が届く
    // given (前提条件):
    let addr = spawn_server().await;
    let mut alice = TestClient::connect(addr).await;

    // when (操作):
    alice.send(ClientEvent::Join("alice".to_string())).await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        ServerEvent::UserJoined(PresencePayload {
            user: "alice".to_string(),
            users: vec!["alice".to_string()],
        })
    );
}

#[tokio::test]
async fn test_second_join_reaches_both_participants() {
    // テスト項目: B が bob として join すると A と B の両方に userJoined が届く
    // given (前提条件):
    let addr = spawn_server().await;
    let mut alice = TestClient::join(addr, "alice").await;

    // when (操作):
    let mut bob = TestClient::connect(addr).await;
    bob.send(ClientEvent::Join("bob".to_string())).await;

    // then (期待する結果): users の順序は問わない
    for client in [&mut alice, &mut bob] {
        match client.recv().await {
            ServerEvent::UserJoined(payload) => {
                assert_eq!(payload.user, "bob");
                assert_eq!(sorted(payload.users), vec!["alice", "bob"]);
            }
            other => panic!("expected userJoined, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_message_reaches_everyone_including_sender() {
    // テスト項目: A の message が A と B の両方に届く
    // given (前提条件):
    let addr = spawn_server().await;
    let mut alice = TestClient::join(addr, "alice").await;
    let mut bob = TestClient::join(addr, "bob").await;
    alice.recv().await; // userJoined(bob)

    // when (操作):
    alice.send_text("hi").await;

    // then (期待する結果):
    let to_alice = alice.recv().await;
    let to_bob = bob.recv().await;
    assert_eq!(to_alice, to_bob);
    match to_alice {
        ServerEvent::Message(ChatMessagePayload {
            text,
            user,
            timestamp,
            ..
        }) => {
            assert_eq!(text, "hi");
            assert_eq!(user, "alice");
            assert!(timestamp.contains('T') && timestamp.ends_with('Z'));
        }
        other => panic!("expected message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_typing_reaches_others_but_not_sender() {
    // テスト項目: B の typing(true) は A にだけ届き、B には届かない
    // given (前提条件):
    let addr = spawn_server().await;
    let mut alice = TestClient::join(addr, "alice").await;
    let mut bob = TestClient::join(addr, "bob").await;
    alice.recv().await; // userJoined(bob)

    // when (操作):
    bob.send(ClientEvent::Typing(true)).await;
    bob.send_text("done typing").await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        ServerEvent::UserTyping(TypingPayload {
            user: "bob".to_string(),
            is_typing: true,
        })
    );
    // B の次のイベントは自分の message であり、userTyping ではない
    assert!(matches!(
        bob.recv().await,
        ServerEvent::Message(ChatMessagePayload { user, .. }) if user == "bob"
    ));
}

#[tokio::test]
async fn test_disconnect_notifies_remaining_participants() {
    // テスト項目: A が切断すると B に userLeft{alice, [bob]} が届く
    // given (前提条件):
    let addr = spawn_server().await;
    let alice = TestClient::join(addr, "alice").await;
    let mut bob = TestClient::join(addr, "bob").await;

    // when (操作):
    alice.close().await;

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        ServerEvent::UserLeft(PresencePayload {
            user: "alice".to_string(),
            users: vec!["bob".to_string()],
        })
    );
}

#[tokio::test]
async fn test_message_before_join_is_rejected() {
    // テスト項目: join 前の message は notJoined エラーで拒否され、誰にもブロードキャストされない
    // given (前提条件):
    let addr = spawn_server().await;
    let mut bob = TestClient::join(addr, "bob").await;
    let mut anonymous = TestClient::connect(addr).await;

    // when (操作):
    anonymous.send_text("hello?").await;

    // then (期待する結果):
    match anonymous.recv().await {
        ServerEvent::Error(payload) => assert_eq!(payload.code, ErrorCode::NotJoined),
        other => panic!("expected error, got {:?}", other),
    }
    // B の次のイベントは自分の message（匿名のメッセージは届いていない）
    bob.send_text("anyone here?").await;
    assert!(matches!(
        bob.recv().await,
        ServerEvent::Message(ChatMessagePayload { user, .. }) if user == "bob"
    ));
}

#[tokio::test]
async fn test_typing_before_join_is_rejected() {
    // テスト項目: join 前の typing は notJoined エラーで拒否される
    // given (前提条件):
    let addr = spawn_server().await;
    let mut anonymous = TestClient::connect(addr).await;

    // when (操作):
    anonymous.send(ClientEvent::Typing(true)).await;

    // then (期待する結果):
    match anonymous.recv().await {
        ServerEvent::Error(payload) => assert_eq!(payload.code, ErrorCode::NotJoined),
        other => panic!("expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_frames_are_rejected_and_connection_survives() {
    // テスト項目: 不正なフレーム・空の表示名は invalidPayload で拒否され、接続は維持される
    // given (前提条件):
    let addr = spawn_server().await;
    let mut client = TestClient::connect(addr).await;

    // when (操作):
    client.send_raw("this is not json").await;
    client.send(ClientEvent::Join("   ".to_string())).await;
    client.send_raw(r#"{"event":"typing","data":"maybe"}"#).await;

    // then (期待する結果):
    for _ in 0..3 {
        match client.recv().await {
            ServerEvent::Error(payload) => assert_eq!(payload.code, ErrorCode::InvalidPayload),
            other => panic!("expected error, got {:?}", other),
        }
    }
    client.send(ClientEvent::Join("carol".to_string())).await;
    assert_eq!(
        client.recv().await,
        ServerEvent::UserJoined(PresencePayload {
            user: "carol".to_string(),
            users: vec!["carol".to_string()],
        })
    );
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    // テスト項目: 空白のみのメッセージは invalidPayload で拒否される
    // given (前提条件):
    let addr = spawn_server().await;
    let mut alice = TestClient::join(addr, "alice").await;

    // when (操作):
    alice.send_text("   ").await;

    // then (期待する結果):
    match alice.recv().await {
        ServerEvent::Error(payload) => assert_eq!(payload.code, ErrorCode::InvalidPayload),
        other => panic!("expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_message_ids_increase_across_senders() {
    // テスト項目: 送信者が異なっても message の id は単調増加する
    // given (前提条件):
    let addr = spawn_server().await;
    let mut alice = TestClient::join(addr, "alice").await;
    let mut bob = TestClient::join(addr, "bob").await;
    alice.recv().await; // userJoined(bob)

    // when (操作):
    alice.send_text("first").await;
    let first = bob.recv().await;
    bob.send_text("second").await;
    let second = bob.recv().await;

    // then (期待する結果):
    match (first, second) {
        (ServerEvent::Message(first), ServerEvent::Message(second)) => {
            assert!(second.id > first.id);
        }
        other => panic!("expected two messages, got {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_display_names_are_allowed() {
    // テスト項目: 同じ表示名で 2 つの接続が join できる
    // given (前提条件):
    let addr = spawn_server().await;
    let mut first = TestClient::join(addr, "alice").await;

    // when (操作):
    let _second = TestClient::join(addr, "alice").await;

    // then (期待する結果):
    match first.recv().await {
        ServerEvent::UserJoined(payload) => {
            assert_eq!(payload.users, vec!["alice", "alice"]);
        }
        other => panic!("expected userJoined, got {:?}", other),
    }
}

#[tokio::test]
async fn test_anonymous_connection_observes_room() {
    // テスト項目: join していない接続もルームのイベントを受信する
    // given (前提条件):
    let addr = spawn_server().await;
    let mut observer = TestClient::connect_ready(addr).await;

    // when (操作):
    let _alice = TestClient::join(addr, "alice").await;

    // then (期待する結果):
    assert_eq!(
        observer.recv().await,
        ServerEvent::UserJoined(PresencePayload {
            user: "alice".to_string(),
            users: vec!["alice".to_string()],
        })
    );
}
