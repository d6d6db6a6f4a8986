use book_portal::{
    guard::{GuardDecision, LOGIN_PATH, Navigation, ROOT_PATH, ReturnState, RouteRequirement, guard, guard_session},
    models::{Role, UserRecord},
    session::Session,
};

// --- Helpers ---

fn user_with_role(role: Option<Role>) -> UserRecord {
    UserRecord {
        role,
        nickname: Some("reader".to_string()),
        ..UserRecord::default()
    }
}

fn all_users() -> Vec<Option<UserRecord>> {
    vec![
        None,
        Some(UserRecord::default()),
        Some(user_with_role(Some(Role::User))),
        Some(user_with_role(Some(Role::Admin))),
    ]
}

const ROLES: [Option<Role>; 3] = [None, Some(Role::User), Some(Role::Admin)];

// Content with identity, so a passthrough can be told apart from a copy.
#[derive(Debug, PartialEq)]
struct Subtree(&'static str);

// --- Tests ---

#[test]
fn test_missing_token_always_redirects_to_login() {
    for token in [None, Some("")] {
        for user in all_users() {
            for role in ROLES {
                let decision = guard(token, user.as_ref(), role, "/community/write", Subtree("write"));
                assert_eq!(
                    decision,
                    GuardDecision::Redirect(Navigation {
                        to: LOGIN_PATH,
                        state: Some(ReturnState {
                            from: "/community/write".to_string()
                        }),
                        replace: true,
                    }),
                    "token={token:?} user={user:?} role={role:?}"
                );
            }
        }
    }
}

#[test]
fn test_admin_route_rejects_non_admins_to_root() {
    let non_admins = [
        None,
        Some(UserRecord::default()),
        Some(user_with_role(Some(Role::User))),
        Some(user_with_role(None)),
    ];

    for user in non_admins {
        let decision = guard(Some("token"), user.as_ref(), Some(Role::Admin), "/admin", Subtree("admin"));
        match decision {
            GuardDecision::Redirect(nav) => {
                assert_eq!(nav.to, ROOT_PATH);
                assert!(nav.replace);
                assert_eq!(nav.state, None);
            }
            GuardDecision::Render(_) => panic!("non-admin {user:?} reached an admin page"),
        }
    }
}

#[test]
fn test_authorized_requests_render_content_unchanged() {
    let admin = user_with_role(Some(Role::Admin));

    // No role requirement: any user, including none at all.
    for user in all_users() {
        assert_eq!(
            guard(Some("token"), user.as_ref(), None, "/mypage", Subtree("mypage")),
            GuardDecision::Render(Subtree("mypage"))
        );
    }

    // Admin requirement with an admin user.
    assert_eq!(
        guard(Some("token"), Some(&admin), Some(Role::Admin), "/admin", Subtree("admin")),
        GuardDecision::Render(Subtree("admin"))
    );
}

#[test]
fn test_guard_is_deterministic() {
    let user = user_with_role(Some(Role::User));
    let first = guard(Some("t"), Some(&user), Some(Role::Admin), "/admin/books", ());
    let second = guard(Some("t"), Some(&user), Some(Role::Admin), "/admin/books", ());
    assert_eq!(first, second);
}

#[test]
fn test_guard_session_reads_from_accessor() {
    let session = Session::new(Some("t".to_string()), Some(user_with_role(Some(Role::Admin))));
    assert_eq!(
        guard_session(&session, RouteRequirement::ADMIN, "/admin", 1),
        GuardDecision::Render(1)
    );

    let anonymous = Session::anonymous();
    assert!(matches!(
        guard_session(&anonymous, RouteRequirement::AUTHENTICATED, "/mypage", 1),
        GuardDecision::Redirect(Navigation { to: LOGIN_PATH, .. })
    ));
}
