use artifact_notifier::{
    context::{Repository, TriggerContext},
    error::NotifyError,
    github::{
        comments::{Comment, CommentService, User},
        paginate::PER_PAGE,
        pulls::{PullRequest, PullRequestHead, PullRequestService},
    },
    notifier::{Notifier, NotifierOptions},
    transactions::{CommentAction, format_message, resolve_pull_request},
    workflow::artifact::{Artifact, ArtifactService},
};
use async_trait::async_trait;
use mockall::{mock, predicate::eq};

// Mocks.

mock! {
    pub Pulls {}

    #[async_trait]
    impl PullRequestService for Pulls {
        async fn list_pull_requests(&self, page: u32) -> anyhow::Result<Vec<PullRequest>>;
    }
}

mock! {
    pub Artifacts {}

    #[async_trait]
    impl ArtifactService for Artifacts {
        async fn list_artifacts(&self, run_id: u64) -> anyhow::Result<Vec<Artifact>>;
    }
}

mock! {
    pub Comments {}

    #[async_trait]
    impl CommentService for Comments {
        async fn list_comments(
            &self,
            issue_number: u64,
            page: u32,
        ) -> anyhow::Result<Vec<Comment>>;
        async fn create_comment(&self, issue_number: u64, body: &str) -> anyhow::Result<Comment>;
        async fn update_comment(&self, comment_id: u64, body: &str) -> anyhow::Result<Comment>;
    }
}

// Fixtures.

const HEAD_SHA: &str = "acb5820ced9479c074f688cc328bf03f341a511d";
const RUN_ID: u64 = 30433642;
const BOT: &str = "github-actions[bot]";
const MIRROR: &str = "https://nightly.link";

fn context() -> TriggerContext {
    TriggerContext {
        repository: Repository::new("octo-org", "octo-repo"),
        run_id: RUN_ID,
        head_sha: HEAD_SHA.to_owned(),
    }
}

fn options() -> NotifierOptions {
    NotifierOptions {
        mirror_url: MIRROR.to_owned(),
        bot_login: BOT.to_owned(),
    }
}

fn pull(number: u64, sha: &str) -> PullRequest {
    PullRequest {
        number,
        head: PullRequestHead {
            sha: sha.to_owned(),
            ref_name: format!("branch-{number}"),
        },
        ..Default::default()
    }
}

fn artifact(id: u64, name: &str) -> Artifact {
    Artifact {
        id,
        name: name.to_owned(),
        ..Default::default()
    }
}

fn comment(id: u64, login: &str) -> Comment {
    Comment {
        id,
        user: Some(User {
            login: login.to_owned(),
        }),
        body: Some(String::from("…")),
        ..Default::default()
    }
}

fn artifacts() -> Vec<Artifact> {
    vec![artifact(1, "linux-x64"), artifact(2, "w64-build")]
}

fn expected_body() -> String {
    format_message(MIRROR, &context().repository, &artifacts())
}

fn pulls_with_match(number: u64) -> MockPulls {
    let mut pulls = MockPulls::new();
    pulls
        .expect_list_pull_requests()
        .with(eq(1))
        .times(1)
        .returning(move |_| Ok(vec![pull(3, "0000000"), pull(number, HEAD_SHA)]));
    pulls
}

fn artifacts_of_run() -> MockArtifacts {
    let mut service = MockArtifacts::new();
    service
        .expect_list_artifacts()
        .with(eq(RUN_ID))
        .times(1)
        .returning(|_| Ok(artifacts()));
    service
}

// Tests.

#[tokio::test]
async fn creates_comment_when_none_exists() {
    let mut comments = MockComments::new();
    comments
        .expect_list_comments()
        .with(eq(7), eq(1))
        .times(1)
        .returning(|_, _| Ok(vec![comment(10, "octocat")]));
    comments
        .expect_create_comment()
        .withf(|issue_number, body| *issue_number == 7 && body == expected_body())
        .times(1)
        .returning(|_, _| Ok(comment(99, BOT)));
    comments.expect_update_comment().never();

    let notifier = Notifier::new(
        pulls_with_match(7),
        artifacts_of_run(),
        comments,
        context(),
        options(),
    );

    assert_eq!(notifier.run().await.unwrap(), CommentAction::Created { id: 99 });
}

#[tokio::test]
async fn updates_existing_bot_comment() {
    let mut comments = MockComments::new();
    comments
        .expect_list_comments()
        .with(eq(7), eq(1))
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                comment(10, "octocat"),
                comment(42, BOT),
                comment(43, BOT),
            ])
        });
    comments
        .expect_update_comment()
        .withf(|comment_id, body| *comment_id == 42 && body == expected_body())
        .times(1)
        .returning(|id, _| Ok(comment(id, BOT)));
    comments.expect_create_comment().never();

    let notifier = Notifier::new(
        pulls_with_match(7),
        artifacts_of_run(),
        comments,
        context(),
        options(),
    );

    assert_eq!(notifier.run().await.unwrap(), CommentAction::Updated { id: 42 });
}

#[tokio::test]
async fn finds_bot_comment_on_later_page() {
    let mut comments = MockComments::new();
    comments
        .expect_list_comments()
        .times(2)
        .returning(|_, page| match page {
            1 => Ok((0..PER_PAGE as u64).map(|id| comment(id, "octocat")).collect()),
            _ => Ok(vec![comment(500, BOT)]),
        });
    comments
        .expect_update_comment()
        .withf(|comment_id, _| *comment_id == 500)
        .times(1)
        .returning(|id, _| Ok(comment(id, BOT)));
    comments.expect_create_comment().never();

    let notifier = Notifier::new(
        pulls_with_match(7),
        artifacts_of_run(),
        comments,
        context(),
        options(),
    );

    assert_eq!(notifier.run().await.unwrap(), CommentAction::Updated { id: 500 });
}

#[tokio::test]
async fn reports_missing_pull_request() {
    let mut pulls = MockPulls::new();
    pulls
        .expect_list_pull_requests()
        .times(1)
        .returning(|_| Ok(vec![pull(3, "0000000"), pull(4, "1111111")]));
    let mut artifacts = MockArtifacts::new();
    artifacts.expect_list_artifacts().never();
    let mut comments = MockComments::new();
    comments.expect_list_comments().never();
    comments.expect_create_comment().never();
    comments.expect_update_comment().never();

    let notifier = Notifier::new(pulls, artifacts, comments, context(), options());
    let err = notifier.run().await.unwrap_err();

    assert!(err.is_reported());
    assert!(matches!(
        err,
        NotifyError::NoMatchingPullRequest { head_sha } if head_sha == HEAD_SHA
    ));
}

#[tokio::test]
async fn reports_missing_artifacts_without_commenting() {
    let mut artifacts = MockArtifacts::new();
    artifacts
        .expect_list_artifacts()
        .with(eq(RUN_ID))
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let mut comments = MockComments::new();
    comments.expect_list_comments().never();
    comments.expect_create_comment().never();
    comments.expect_update_comment().never();

    let notifier = Notifier::new(pulls_with_match(7), artifacts, comments, context(), options());
    let err = notifier.run().await.unwrap_err();

    assert!(err.is_reported());
    assert!(matches!(err, NotifyError::NoArtifacts { run_id: RUN_ID }));
}

#[tokio::test]
async fn propagates_api_errors() {
    let mut comments = MockComments::new();
    comments
        .expect_list_comments()
        .times(1)
        .returning(|_, _| {
            Err(anyhow::anyhow!(
                "failed to request comments: 502 Bad Gateway"
            ))
        });
    comments.expect_create_comment().never();
    comments.expect_update_comment().never();

    let notifier = Notifier::new(
        pulls_with_match(7),
        artifacts_of_run(),
        comments,
        context(),
        options(),
    );
    let err = notifier.run().await.unwrap_err();

    assert!(!err.is_reported());
    assert!(matches!(err, NotifyError::Api(_)));
}

#[tokio::test]
async fn resolves_every_listed_head() {
    let listed = (0..PER_PAGE as u64 + 20)
        .map(|number| pull(number + 1, &format!("{number:040x}")))
        .collect::<Vec<_>>();

    for expected in &listed {
        let listed = listed.clone();
        let mut pulls = MockPulls::new();
        pulls.expect_list_pull_requests().returning(move |page| {
            Ok(listed
                .iter()
                .skip((page as usize - 1) * PER_PAGE)
                .take(PER_PAGE)
                .cloned()
                .collect())
        });

        let number = resolve_pull_request(&pulls, &expected.head.sha).await.unwrap();
        assert_eq!(number, expected.number);
    }
}

#[tokio::test]
async fn stops_listing_pull_requests_at_first_match() {
    let mut pulls = MockPulls::new();
    pulls
        .expect_list_pull_requests()
        .with(eq(1))
        .times(1)
        .returning(|_| {
            Ok((0..PER_PAGE as u64)
                .map(|number| pull(number, if number == 5 { HEAD_SHA } else { "0000000" }))
                .collect())
        });

    assert_eq!(resolve_pull_request(&pulls, HEAD_SHA).await.unwrap(), 5);
}
