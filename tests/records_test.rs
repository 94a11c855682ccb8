use nanobanana::captioner::split_captions;
use nanobanana::records::sqlite::SqlitePosts;
use nanobanana::records::{NewPost, PostStore};

fn post(chat_id: i64, url: &str, captions: &str) -> NewPost {
    NewPost::pending(chat_id, url, split_captions(captions))
}

#[tokio::test]
async fn latest_is_most_recent_insert() {
    let posts = SqlitePosts::in_memory().unwrap();

    posts.insert(post(1, "https://x/old.jpg", "a|||b|||c")).await.unwrap();
    let newest = posts
        .insert(post(1, "https://x/new.jpg", "d|||e|||f"))
        .await
        .unwrap();

    let record = posts.latest_for(1).await.unwrap().unwrap();
    assert_eq!(record.id, newest);
    assert_eq!(record.photo_url, "https://x/new.jpg");
    assert_eq!(record.caption(1), Some("d"));
}

#[tokio::test]
async fn users_do_not_see_each_others_records() {
    let posts = SqlitePosts::in_memory().unwrap();

    posts.insert(post(1, "https://x/1.jpg", "a|||b|||c")).await.unwrap();
    posts.insert(post(2, "https://x/2.jpg", "d|||e|||f")).await.unwrap();

    assert_eq!(
        posts.latest_for(1).await.unwrap().unwrap().photo_url,
        "https://x/1.jpg"
    );
    assert_eq!(
        posts.latest_for(2).await.unwrap().unwrap().photo_url,
        "https://x/2.jpg"
    );
    assert!(posts.latest_for(3).await.unwrap().is_none());
}

#[tokio::test]
async fn records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    let path_str = path.to_str().unwrap();

    {
        let posts = SqlitePosts::open(path_str).unwrap();
        posts.insert(post(9, "https://x/9.jpg", "a|||b|||c")).await.unwrap();
    }

    let posts = SqlitePosts::open(path_str).unwrap();
    let record = posts.latest_for(9).await.unwrap().unwrap();
    assert_eq!(record.caption(3), Some("c"));
}

#[tokio::test]
async fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("records.db");

    let posts = SqlitePosts::open(path.to_str().unwrap()).unwrap();
    posts.insert(post(1, "u", "a|||b|||c")).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn captions_with_quotes_and_unicode_survive() {
    let posts = SqlitePosts::in_memory().unwrap();
    let captions = "It's 🍕 time! ||| \"Best\" slice in town ||| Línea 3; DROP TABLE posts;";
    posts.insert(post(4, "u", captions)).await.unwrap();

    let record = posts.latest_for(4).await.unwrap().unwrap();
    assert_eq!(record.caption(1), Some("It's 🍕 time!"));
    assert_eq!(record.caption(2), Some("\"Best\" slice in town"));
    assert_eq!(record.caption(3), Some("Línea 3; DROP TABLE posts;"));
}
