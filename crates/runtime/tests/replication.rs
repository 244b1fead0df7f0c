mod common;

use park_core::{
    Action, BannerRemoveAction, CoordsXY, GroupId, NetworkMode, PlayerId, PlayerSetGroupAction,
    Status, TileModifyAction, TileModifyType,
};
use park_runtime::ActionDispatcher;

use common::{ADMIN, BANNER_AT, GUEST};

fn peer(mode: NetworkMode) -> ActionDispatcher {
    ActionDispatcher::new(common::park(mode), common::config()).with_scenery(common::scenery())
}

/// Moves `from`'s outbound actions to `to` over a connection owned by `sender`.
fn deliver(
    from: &mut ActionDispatcher,
    sender: PlayerId,
    to: &mut ActionDispatcher,
    tick: u32,
) {
    for bytes in from.take_outbound() {
        to.receive(tick, sender, &bytes).expect("replicated payload decodes");
    }
}

#[test]
fn server_actions_replicate_to_client() {
    let mut server = peer(NetworkMode::Server);
    let mut client = peer(NetworkMode::Client);

    let actions: Vec<Action> = vec![
        BannerRemoveAction::new(BANNER_AT).into(),
        PlayerSetGroupAction::new(GUEST, GroupId::USER).into(),
        TileModifyAction::new(CoordsXY::new(64, 64), TileModifyType::SurfaceToggleCorner, 1, 0)
            .into(),
    ];
    for action in actions {
        let result = server
            .execute(action.with_player(PlayerId::HOST))
            .expect("server executes");
        assert!(result.is_ok(), "{result}");
    }

    deliver(&mut server, PlayerId::HOST, &mut client, 1);
    assert_eq!(client.pending(), 3);
    let results = client.process_tick(1).expect("client executes");
    assert!(results.iter().all(|result| result.is_ok()));

    assert_eq!(client.checksum().unwrap(), server.checksum().unwrap());
    assert_eq!(client.state().finance, server.state().finance);
    assert_eq!(
        client.state().network.player(GUEST).map(|player| player.group),
        Some(GroupId::USER)
    );
    assert_eq!(
        server.state().network.known_users.get("c0ffee"),
        Some(&GroupId::USER)
    );
    assert!(client.take_outbound().is_empty());
}

#[test]
fn client_actions_round_trip_through_server_permissions() {
    let mut server = peer(NetworkMode::Server);
    let mut client = peer(NetworkMode::Client);
    let before = client.checksum().unwrap();

    let edit = TileModifyAction::new(CoordsXY::new(64, 64), TileModifyType::SurfaceToggleDiagonal, 0, 0);
    let from_guest = Action::from(edit.clone()).with_player(GUEST);
    let from_admin = Action::from(edit).with_player(ADMIN);

    assert!(client.execute(from_guest).unwrap().is_ok());
    deliver(&mut client, GUEST, &mut server, 2);
    assert!(client.execute(from_admin).unwrap().is_ok());
    deliver(&mut client, ADMIN, &mut server, 2);
    assert_eq!(client.checksum().unwrap(), before);

    let results = server.process_tick(2).unwrap();
    assert_eq!(results[0].status, Status::Disallowed);
    assert!(results[1].is_ok());

    deliver(&mut server, PlayerId::HOST, &mut client, 3);
    assert_eq!(client.pending(), 1);
    client.process_tick(3).unwrap();
    assert_eq!(client.checksum().unwrap(), server.checksum().unwrap());
    assert_ne!(client.checksum().unwrap(), before);
}

#[test]
fn replicated_banner_removal_fails_identically_on_both_peers() {
    let mut server = peer(NetworkMode::Server);
    let mut client = peer(NetworkMode::Client);

    let remove = Action::from(BannerRemoveAction::new(BANNER_AT)).with_player(PlayerId::HOST);
    assert!(server.execute(remove.clone()).unwrap().is_ok());
    let again = server.execute(remove).unwrap();
    assert_eq!(again.status, Status::InvalidParameters);

    // Only the successful execution is broadcast.
    deliver(&mut server, PlayerId::HOST, &mut client, 1);
    assert_eq!(client.pending(), 1);
    client.process_tick(1).unwrap();
    assert_eq!(client.checksum().unwrap(), server.checksum().unwrap());
}

#[test]
fn forged_player_id_cannot_escalate_a_guest() {
    let mut server = peer(NetworkMode::Server);
    let mut guest = peer(NetworkMode::Client);

    let promote =
        Action::from(PlayerSetGroupAction::new(GUEST, GroupId::ADMIN)).with_player(ADMIN);
    assert!(guest.execute(promote).unwrap().is_ok());
    deliver(&mut guest, GUEST, &mut server, 1);

    let results = server.process_tick(1).unwrap();
    assert_eq!(results[0].status, Status::Disallowed);
    assert_eq!(
        server.state().network.player(GUEST).map(|player| player.group),
        Some(GroupId::GUEST)
    );
    assert!(server.take_outbound().is_empty());
}

#[test]
fn paused_client_stays_in_sync_with_server() {
    let mut server = peer(NetworkMode::Server);
    let mut client = peer(NetworkMode::Client);
    client.set_paused(true);

    let remove = Action::from(BannerRemoveAction::new(BANNER_AT)).with_player(PlayerId::HOST);
    assert!(server.execute(remove).unwrap().is_ok());

    deliver(&mut server, PlayerId::HOST, &mut client, 1);
    let results = client.process_tick(1).unwrap();
    assert!(results[0].is_ok(), "{}", results[0]);
    assert_eq!(client.checksum().unwrap(), server.checksum().unwrap());
    assert_eq!(client.state().finance, server.state().finance);
}
