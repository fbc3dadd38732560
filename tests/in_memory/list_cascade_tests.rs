//! List lifecycle flows, including cascading removal of items.

use crate::in_memory::helpers::{TestApp, add_item, app, list_for, register};
use rstest::rstest;
use tasktree::error::ErrorKind;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_every_item(app: TestApp) {
    let erin = register(&app, "erin").await.expect("erin registers");
    let list = list_for(&app, &erin, "Trip").await.expect("list");
    let packing = add_item(&app, &erin, &list, "Packing", None)
        .await
        .expect("packing");
    let clothes = add_item(&app, &erin, &list, "Clothes", Some(&packing))
        .await
        .expect("clothes");
    add_item(&app, &erin, &list, "Socks", Some(&clothes))
        .await
        .expect("socks");
    add_item(&app, &erin, &list, "Book hotel", None)
        .await
        .expect("hotel");

    let removed = app
        .lists()
        .delete_list(erin.id(), list.id())
        .await
        .expect("delete succeeds");

    assert_eq!(removed, 4);
    let lookup = app.items().get_item(erin.id(), clothes.id()).await;
    assert_eq!(lookup.err().map(|err| err.kind()), Some(ErrorKind::NotFound));
    assert!(
        app.lists()
            .lists_for_owner(erin.id())
            .await
            .expect("lists load")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_only_see_their_own_lists(app: TestApp) {
    let frank = register(&app, "frank").await.expect("frank registers");
    let grace = register(&app, "grace").await.expect("grace registers");
    let franks = list_for(&app, &frank, "Frank's").await.expect("list");
    list_for(&app, &grace, "Grace's").await.expect("list");

    let visible = app
        .lists()
        .lists_for_owner(frank.id())
        .await
        .expect("lists load");
    let peek = app.lists().get_list(grace.id(), franks.id()).await;

    assert_eq!(visible, vec![franks]);
    assert_eq!(peek.err().map(|err| err.kind()), Some(ErrorKind::Authorization));
}
