//! Integration tests for the Sangha server.
//!
//! Each test spins the full router against its own in-memory SQLite
//! database; email and object storage run disabled.
//!
//! Run with: cargo test -p sangha-server --test integration_tests

use reqwest::{Client, StatusCode};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn unique_phone() -> String {
    format!("98000{:05}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Test helper to start a test server
async fn start_test_server() -> TestServer {
    TestServer::start().await.expect("Failed to start test server")
}

/// Test server wrapper
struct TestServer {
    addr: std::net::SocketAddr,
    db_pool: sqlx::SqlitePool,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    async fn start() -> anyhow::Result<Self> {
        let config = sangha_server::state::Config {
            bind_address: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            session_secret: "test-secret-key-for-testing-only".to_string(),
            admin_password: "club-admin-pass".to_string(),
            club_name: "Test Club".to_string(),
            smtp_host: None,
            smtp_username: String::new(),
            smtp_password: String::new(),
            mail_from: "Test Club <noreply@test.local>".to_string(),
            admin_email: Some("committee@test.local".to_string()),
            storage_bucket: None,
            storage_public_url: None,
        };

        let (router, db_pool) = sangha_server::create_app(config).await?;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        tokio::time::sleep(Duration::from_millis(50)).await;

        Ok(Self {
            addr,
            db_pool,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    fn http_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Extracts the session cookie pair from a Set-Cookie header.
fn session_cookie(response: &reqwest::Response) -> String {
    let header = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("No Set-Cookie header")
        .to_str()
        .expect("Invalid Set-Cookie header");

    header
        .split(';')
        .next()
        .expect("Empty Set-Cookie header")
        .to_string()
}

/// Logs in on the admin surface and returns the session cookie.
async fn admin_session(client: &Client, http_url: &str) -> String {
    let response = client
        .post(format!("{http_url}/api/admin/login"))
        .json(&json!({ "password": "club-admin-pass" }))
        .send()
        .await
        .expect("Admin login request failed");

    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

/// Submits a join application and returns the created member JSON.
async fn submit_application(
    client: &Client,
    http_url: &str,
    full_name: &str,
    phone: &str,
    email: Option<&str>,
) -> serde_json::Value {
    let response = client
        .post(format!("{http_url}/api/join"))
        .json(&json!({
            "fullName": full_name,
            "guardianName": "Guardian",
            "dob": "1998-04-12",
            "bloodGroup": "B+",
            "phone": phone,
            "email": email,
            "address": "12 Club Road"
        }))
        .send()
        .await
        .expect("Join request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("Invalid join response");
    assert_eq!(body["success"], json!(true));
    body["data"].clone()
}

/// Invites a member with the given designation, resets their password
/// through the OTP flow to a known value, logs in, and returns
/// (session cookie, username).
async fn establish_member(
    server: &TestServer,
    client: &Client,
    designation: &str,
) -> (String, String) {
    let http_url = server.http_url();
    let admin = admin_session(client, &http_url).await;
    let phone = unique_phone();

    let response = client
        .post(format!("{http_url}/api/admin/invite"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({
            "fullName": format!("Holder {}", phone),
            "phone": phone,
            "email": format!("holder{}@test.local", phone),
            "designation": designation,
            "dob": "1990-01-01"
        }))
        .send()
        .await
        .expect("Invite request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("Invalid invite response");
    let username = body["data"]["username"]
        .as_str()
        .expect("Invited member has no username")
        .to_string();

    // The generated password only ever travels by email, so take the OTP
    // route to set a known one.
    let response = client
        .post(format!("{http_url}/api/auth/forgot-password"))
        .json(&json!({ "identifier": username }))
        .send()
        .await
        .expect("Forgot-password request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let otp: String = sqlx::query_scalar("SELECT reset_otp FROM members WHERE username = $1")
        .bind(&username)
        .fetch_one(&server.db_pool)
        .await
        .expect("No OTP stored");

    let response = client
        .post(format!("{http_url}/api/auth/reset-password"))
        .json(&json!({
            "identifier": username,
            "otp": otp,
            "newPassword": "KnownPass123!"
        }))
        .send()
        .await
        .expect("Reset-password request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(format!("{http_url}/api/login"))
        .json(&json!({ "username": username, "password": "KnownPass123!" }))
        .send()
        .await
        .expect("Login request failed");
    assert_eq!(response.status(), StatusCode::OK);

    (session_cookie(&response), username)
}

// ============================================================================
// Membership workflow
// ============================================================================

#[tokio::test]
async fn join_creates_pending_member_without_credentials() {
    let server = start_test_server().await;
    let client = Client::new();

    let member = submit_application(
        &client,
        &server.http_url(),
        "Arun Pal",
        &unique_phone(),
        Some("arun@test.local"),
    )
    .await;

    assert_eq!(member["status"], json!("Pending"));
    assert_eq!(member["designation"], json!("Member"));
    assert!(member["username"].is_null());
    // The hash must never serialize, let alone a password.
    assert!(member.get("password").is_none());
    assert!(member.get("passwordHash").is_none());
}

#[tokio::test]
async fn approval_issues_derived_credentials_once() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let member = submit_application(
        &client,
        &http_url,
        "Ramesh Das",
        "9876542345",
        Some("ramesh@test.local"),
    )
    .await;
    let id = member["id"].as_str().unwrap().to_string();

    let admin = admin_session(&client, &http_url).await;

    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": id, "status": "Approved" }))
        .send()
        .await
        .expect("Approve request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], json!("Approved"));
    assert_eq!(body["data"]["username"], json!("ramesh2345"));

    let hash_before: String =
        sqlx::query_scalar("SELECT password_hash FROM members WHERE username = 'ramesh2345'")
            .fetch_one(&server.db_pool)
            .await
            .unwrap();
    assert!(hash_before.starts_with("$argon2"));

    // Re-approving must not regenerate credentials.
    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": id, "status": "Approved" }))
        .send()
        .await
        .expect("Second approve request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let hash_after: String =
        sqlx::query_scalar("SELECT password_hash FROM members WHERE username = 'ramesh2345'")
            .fetch_one(&server.db_pool)
            .await
            .unwrap();
    assert_eq!(hash_before, hash_after);
}

#[tokio::test]
async fn approval_with_colliding_username_conflicts_and_stays_pending() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    // Same first name, same last four phone digits: both derive "ramesh2345".
    let first = submit_application(
        &client,
        &http_url,
        "Ramesh Das",
        "9876542345",
        Some("ramesh.d@test.local"),
    )
    .await;
    let second = submit_application(
        &client,
        &http_url,
        "Ramesh Kar",
        "8765432345",
        Some("ramesh.k@test.local"),
    )
    .await;

    let admin = admin_session(&client, &http_url).await;
    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": first["id"], "status": "Approved" }))
        .send()
        .await
        .expect("First approve request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": second["id"], "status": "Approved" }))
        .send()
        .await
        .expect("Second approve request failed");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));

    // The failed transition left the second applicant untouched.
    let (status, username): (String, Option<String>) =
        sqlx::query_as("SELECT status, username FROM members WHERE full_name = 'Ramesh Kar'")
            .fetch_one(&server.db_pool)
            .await
            .unwrap();
    assert_eq!(status, "Pending");
    assert!(username.is_none());
}

#[tokio::test]
async fn rejection_leaves_credentials_unset() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let member =
        submit_application(&client, &http_url, "Bimal Kar", &unique_phone(), None).await;
    let id = member["id"].as_str().unwrap().to_string();

    let admin = admin_session(&client, &http_url).await;
    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": id, "status": "Rejected" }))
        .send()
        .await
        .expect("Reject request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], json!("Rejected"));
    assert!(body["data"]["username"].is_null());
}

#[tokio::test]
async fn approving_unknown_member_is_not_found() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let admin = admin_session(&client, &http_url).await;
    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": uuid::Uuid::new_v4(), "status": "Approved" }))
        .send()
        .await
        .expect("Approve request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn invite_creates_approved_member_with_credentials() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let admin = admin_session(&client, &http_url).await;
    let response = client
        .post(format!("{http_url}/api/admin/invite"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({
            "fullName": "Sunita Maity",
            "email": "sunita@test.local",
            "designation": "Treasurer"
        }))
        .send()
        .await
        .expect("Invite request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["status"], json!("Approved"));
    assert_eq!(data["designation"], json!("Treasurer"));

    // No phone on file: the username suffix is a random 4-digit filler.
    let username = data["username"].as_str().unwrap();
    assert!(username.starts_with("sunita"));
    let suffix = &username["sunita".len()..];
    assert_eq!(suffix.len(), 4);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
}

// ============================================================================
// Auth and gates
// ============================================================================

#[tokio::test]
async fn admin_login_rejects_wrong_passphrase() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/admin/login", server.http_url()))
        .json(&json!({ "password": "wrong" }))
        .send()
        .await
        .expect("Admin login request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn member_listing_distinguishes_no_session_from_wrong_role() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    // No session at all: not authenticated.
    let response = client
        .get(format!("{http_url}/api/admin/members"))
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated member session, but member administration is admin-only.
    let (member_cookie, _) = establish_member(&server, &client, "Member").await;
    let response = client
        .get(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &member_cookie)
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin session passes.
    let admin = admin_session(&client, &http_url).await;
    let response = client
        .get(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_bad_credentials_and_inactive_accounts() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let response = client
        .post(format!("{http_url}/api/login"))
        .json(&json!({ "username": "nobody1234", "password": "nope" }))
        .send()
        .await
        .expect("Login request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (_, username) = establish_member(&server, &client, "Member").await;

    let response = client
        .post(format!("{http_url}/api/login"))
        .json(&json!({ "username": username, "password": "WrongPass!" }))
        .send()
        .await
        .expect("Login request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Rejecting the account blocks login with otherwise valid credentials.
    let admin = admin_session(&client, &http_url).await;
    let id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM members WHERE username = $1")
        .bind(&username)
        .fetch_one(&server.db_pool)
        .await
        .unwrap();
    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": id, "status": "Rejected" }))
        .send()
        .await
        .expect("Reject request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(format!("{http_url}/api/login"))
        .json(&json!({ "username": username, "password": "KnownPass123!" }))
        .send()
        .await
        .expect("Login request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn member_profile_roundtrip_excludes_secrets() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (cookie, username) = establish_member(&server, &client, "Member").await;

    let response = client
        .get(format!("{http_url}/api/member/me"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .expect("Profile request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["username"], json!(username));
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("resetOtp").is_none());

    // Self-service edit; email stays immutable through this path.
    let response = client
        .put(format!("{http_url}/api/member/update"))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({ "address": "New Address 42" }))
        .send()
        .await
        .expect("Update request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["address"], json!("New Address 42"));
}

#[tokio::test]
async fn profile_username_change_enforces_uniqueness() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (_, taken) = establish_member(&server, &client, "Member").await;
    let (cookie, _) = establish_member(&server, &client, "Member").await;

    let response = client
        .put(format!("{http_url}/api/member/update"))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({ "username": taken }))
        .send()
        .await
        .expect("Update request failed");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn forgot_password_does_not_reveal_account_existence() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/auth/forgot-password", server.http_url()))
        .json(&json!({ "identifier": "no-such-account" }))
        .send()
        .await
        .expect("Forgot-password request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("If account exists, OTP sent."));
}

#[tokio::test]
async fn forgot_password_without_linked_email_is_actionable() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    // Application without email, then approval: credentials exist but no
    // address to send a code to.
    let member =
        submit_application(&client, &http_url, "Nirmal Sen", &unique_phone(), None).await;
    let id = member["id"].as_str().unwrap().to_string();

    let admin = admin_session(&client, &http_url).await;
    let response = client
        .put(format!("{http_url}/api/admin/members"))
        .header(reqwest::header::COOKIE, &admin)
        .json(&json!({ "id": id, "status": "Approved" }))
        .send()
        .await
        .expect("Approve request failed");
    let body: serde_json::Value = response.json().await.unwrap();
    let username = body["data"]["username"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{http_url}/api/auth/forgot-password"))
        .json(&json!({ "identifier": username }))
        .send()
        .await
        .expect("Forgot-password request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn otp_reset_is_single_use_and_expires() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (_, username) = establish_member(&server, &client, "Member").await;

    // Fresh OTP.
    client
        .post(format!("{http_url}/api/auth/forgot-password"))
        .json(&json!({ "identifier": username }))
        .send()
        .await
        .expect("Forgot-password request failed");
    let otp: String = sqlx::query_scalar("SELECT reset_otp FROM members WHERE username = $1")
        .bind(&username)
        .fetch_one(&server.db_pool)
        .await
        .unwrap();

    // Wrong code first.
    let wrong = if otp == "000000" { "000001" } else { "000000" };
    let response = client
        .post(format!("{http_url}/api/auth/reset-password"))
        .json(&json!({ "identifier": username, "otp": wrong, "newPassword": "Fresh1!" }))
        .send()
        .await
        .expect("Reset request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Correct code succeeds once.
    let response = client
        .post(format!("{http_url}/api/auth/reset-password"))
        .json(&json!({ "identifier": username, "otp": otp, "newPassword": "Fresh1!" }))
        .send()
        .await
        .expect("Reset request failed");
    assert_eq!(response.status(), StatusCode::OK);

    // Replaying the same code fails with the same generic error.
    let response = client
        .post(format!("{http_url}/api/auth/reset-password"))
        .json(&json!({ "identifier": username, "otp": otp, "newPassword": "Again1!" }))
        .send()
        .await
        .expect("Reset request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Expired codes fail even when they match.
    client
        .post(format!("{http_url}/api/auth/forgot-password"))
        .json(&json!({ "identifier": username }))
        .send()
        .await
        .expect("Forgot-password request failed");
    sqlx::query("UPDATE members SET reset_otp_expires = $1 WHERE username = $2")
        .bind(chrono::Utc::now() - chrono::Duration::minutes(1))
        .bind(&username)
        .execute(&server.db_pool)
        .await
        .unwrap();
    let otp: String = sqlx::query_scalar("SELECT reset_otp FROM members WHERE username = $1")
        .bind(&username)
        .fetch_one(&server.db_pool)
        .await
        .unwrap();
    let response = client
        .post(format!("{http_url}/api/auth/reset-password"))
        .json(&json!({ "identifier": username, "otp": otp, "newPassword": "Late1!" }))
        .send()
        .await
        .expect("Reset request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Treasury ledger
// ============================================================================

#[tokio::test]
async fn treasury_writes_are_role_gated() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let entry = json!({
        "type": "Income",
        "category": "Membership Fees",
        "amount": 100.0,
        "description": "Annual dues",
        "date": "2025-01-10"
    });

    // No session: not authenticated.
    let response = client
        .post(format!("{http_url}/api/treasury/transactions"))
        .json(&entry)
        .send()
        .await
        .expect("Create request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Plain member: authenticated but insufficient role.
    let (member_cookie, _) = establish_member(&server, &client, "Member").await;
    let response = client
        .post(format!("{http_url}/api/treasury/transactions"))
        .header(reqwest::header::COOKIE, &member_cookie)
        .json(&entry)
        .send()
        .await
        .expect("Create request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Treasurer passes.
    let (treasurer_cookie, _) = establish_member(&server, &client, "Treasurer").await;
    let response = client
        .post(format!("{http_url}/api/treasury/transactions"))
        .header(reqwest::header::COOKIE, &treasurer_cookie)
        .json(&entry)
        .send()
        .await
        .expect("Create request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ledger_summary_folds_over_all_entries() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (cookie, username) = establish_member(&server, &client, "Treasurer").await;

    for (kind, amount, date) in [
        ("Income", 100.0, "2025-01-10"),
        ("Expense", 40.0, "2025-01-12"),
        ("Income", 5.0, "2025-01-15"),
    ] {
        let response = client
            .post(format!("{http_url}/api/treasury/transactions"))
            .header(reqwest::header::COOKIE, &cookie)
            .json(&json!({
                "type": kind,
                "category": "General",
                "amount": amount,
                "description": "entry",
                "date": date
            }))
            .send()
            .await
            .expect("Create request failed");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = client
        .get(format!("{http_url}/api/treasury/transactions"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["summary"]["totalIncome"], json!(105.0));
    assert_eq!(data["summary"]["totalExpense"], json!(40.0));
    assert_eq!(data["summary"]["balance"], json!(65.0));

    // Newest transaction date first.
    let transactions = data["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 3);
    assert_eq!(transactions[0]["date"], json!("2025-01-15"));

    // recorded_by snapshots the acting role-holder's display name.
    let holder: String = sqlx::query_scalar("SELECT full_name FROM members WHERE username = $1")
        .bind(&username)
        .fetch_one(&server.db_pool)
        .await
        .unwrap();
    assert_eq!(transactions[0]["recordedBy"], json!(holder));
}

#[tokio::test]
async fn treasury_rejects_non_positive_amounts() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (cookie, _) = establish_member(&server, &client, "President").await;

    let response = client
        .post(format!("{http_url}/api/treasury/transactions"))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({
            "type": "Expense",
            "category": "General",
            "amount": -5.0,
            "description": "bad",
            "date": "2025-02-01"
        }))
        .send()
        .await
        .expect("Create request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_missing_transaction_is_not_found() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (cookie, _) = establish_member(&server, &client, "Treasurer").await;

    let response = client
        .delete(format!("{http_url}/api/treasury/transactions"))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({ "id": uuid::Uuid::new_v4() }))
        .send()
        .await
        .expect("Delete request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Notices and events
// ============================================================================

#[tokio::test]
async fn notices_are_publicly_readable_but_office_managed() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (president_cookie, username) = establish_member(&server, &client, "President").await;

    let response = client
        .post(format!("{http_url}/api/notices"))
        .header(reqwest::header::COOKIE, &president_cookie)
        .json(&json!({
            "title": "Annual General Meeting",
            "content": "The AGM will be held on the club grounds.",
            "isImportant": true
        }))
        .send()
        .await
        .expect("Create request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let notice = &body["data"];
    assert_eq!(notice["designation"], json!("President"));
    let holder: String = sqlx::query_scalar("SELECT full_name FROM members WHERE username = $1")
        .bind(&username)
        .fetch_one(&server.db_pool)
        .await
        .unwrap();
    assert_eq!(notice["postedBy"], json!(holder));
    let id = notice["id"].as_str().unwrap().to_string();

    // Public read without any session.
    let response = client
        .get(format!("{http_url}/api/notices"))
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // A plain member cannot manage notices.
    let (member_cookie, _) = establish_member(&server, &client, "Member").await;
    let response = client
        .delete(format!("{http_url}/api/notices"))
        .header(reqwest::header::COOKIE, &member_cookie)
        .json(&json!({ "id": id }))
        .send()
        .await
        .expect("Delete request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Edit then delete as the office holder.
    let response = client
        .put(format!("{http_url}/api/notices"))
        .header(reqwest::header::COOKIE, &president_cookie)
        .json(&json!({ "id": id, "title": "AGM (updated)", "content": "Moved indoors." }))
        .send()
        .await
        .expect("Update request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{http_url}/api/notices"))
        .header(reqwest::header::COOKIE, &president_cookie)
        .json(&json!({ "id": id }))
        .send()
        .await
        .expect("Delete request failed");
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again: the row is gone.
    let response = client
        .delete(format!("{http_url}/api/notices"))
        .header(reqwest::header::COOKIE, &president_cookie)
        .json(&json!({ "id": id }))
        .send()
        .await
        .expect("Delete request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_crud_by_secretary() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let (cookie, _) = establish_member(&server, &client, "Secretary").await;

    let response = client
        .post(format!("{http_url}/api/events"))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({
            "title": "Winter Sports Meet",
            "date": "2026-01-26",
            "time": "9:00 AM",
            "location": "Club Ground",
            "category": "Sports",
            "shortDesc": "Annual sports day",
            "fullDesc": "Track and field events for all age groups.",
            "image": "https://cdn.test.local/assets/sports.jpg",
            "coordinator": "Sports Committee",
            "contact": "sports@test.local",
            "isFeatured": true
        }))
        .send()
        .await
        .expect("Create request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let event = &body["data"];
    assert_eq!(event["entryFee"], json!("Free"));
    assert_eq!(event["contact"], json!("sports@test.local"));
    assert_eq!(event["isFeatured"], json!(true));
    let id = event["id"].as_str().unwrap().to_string();

    // Public listing.
    let response = client
        .get(format!("{http_url}/api/events"))
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = client
        .delete(format!("{http_url}/api/events"))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({ "id": id }))
        .send()
        .await
        .expect("Delete request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Gallery and uploads
// ============================================================================

#[tokio::test]
async fn gallery_listing_is_public_and_upload_requires_member() {
    let server = start_test_server().await;
    let client = Client::new();
    let http_url = server.http_url();

    let response = client
        .get(format!("{http_url}/api/gallery"))
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF])
                .file_name("photo.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
        .text("caption", "Club house")
        .text("category", "Social Welfare");

    // Without a session the upload never reaches storage.
    let response = client
        .post(format!("{http_url}/api/gallery/upload"))
        .multipart(form)
        .send()
        .await
        .expect("Upload request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With a member session but no configured bucket, storage reports
    // itself unavailable.
    let (cookie, _) = establish_member(&server, &client, "Member").await;
    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF])
                .file_name("photo.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
        .text("caption", "Club house")
        .text("category", "Social Welfare");
    let response = client
        .post(format!("{http_url}/api/gallery/upload"))
        .header(reqwest::header::COOKIE, &cookie)
        .multipart(form)
        .send()
        .await
        .expect("Upload request failed");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // A category outside the fixed set is rejected before the upload.
    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF])
                .file_name("photo.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
        .text("caption", "Club house")
        .text("category", "Picnic");
    let response = client
        .post(format!("{http_url}/api/gallery/upload"))
        .header(reqwest::header::COOKIE, &cookie)
        .multipart(form)
        .send()
        .await
        .expect("Upload request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
