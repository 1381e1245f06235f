use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use gfl_core::Score;
use gfl_storage::Credentials;
use gfl_storage::StorageError;
use gfl_storage::Store;
use gfl_storage::User;
use std::sync::Arc;

/// Issues a fresh token for an identity plus its stored score.
fn granted(tokens: &Crypto, user: &User, score: Score) -> HttpResponse {
    let claims = Claims::new(user.id(), user.display_name().to_string(), user.is_temporary());
    match tokens.encode(&claims) {
        Ok(token) => HttpResponse::Ok().json(AuthResponse {
            token,
            user: UserInfo {
                id: user.id().to_string(),
                display_name: user.display_name().to_string(),
                temporary: user.is_temporary(),
                score,
            },
        }),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

fn rejected(e: StorageError) -> HttpResponse {
    match e {
        StorageError::UsernameTaken(_)
        | StorageError::AlreadyRegistered
        | StorageError::NotRegistered => HttpResponse::Conflict().body(e.to_string()),
        StorageError::UnknownUser(_) => {
            HttpResponse::Unauthorized().body("account no longer exists")
        }
        StorageError::Io(_) | StorageError::Codec(_) => {
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Creates a registered account, or upgrades the calling temporary
/// account in place so its identity and score carry over.
pub async fn register(
    store: web::Data<Arc<Store>>,
    tokens: web::Data<Crypto>,
    auth: Option<Auth>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    for (value, field) in [
        (&req.username, "username"),
        (&req.password, "password"),
        (&req.display_name, "display name"),
    ] {
        if let Err(e) = require_filled(value, field) {
            return HttpResponse::BadRequest().body(e.to_string());
        }
    }
    if req.password.len() < 8 {
        return HttpResponse::BadRequest().body(AuthError::WeakPassword.to_string());
    }
    let hashword = match password::hash(&req.password) {
        Ok(h) => h,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    let created = match auth {
        Some(auth) => {
            let credentials = Credentials {
                name: req.username.clone(),
                hashword,
            };
            store.update_user(auth.user(), |user| match user {
                User::Regular { .. } => Err(StorageError::AlreadyRegistered),
                User::Temporary { id, .. } => Ok(User::Regular {
                    id: *id,
                    display_name: req.display_name.clone(),
                    credentials,
                }),
            })
        }
        None => store.add_user(|id| User::Regular {
            id,
            display_name: req.display_name.clone(),
            credentials: Credentials {
                name: req.username.clone(),
                hashword,
            },
        }),
    };
    match created {
        Ok(user) => {
            let score = store.get(user.id()).map(|entry| entry.score).unwrap_or(0);
            log::info!("[auth] registered {}", user.id());
            granted(&tokens, &user, score)
        }
        Err(e) => rejected(e),
    }
}

/// Verifies a username and password and issues a token.
pub async fn login(
    store: web::Data<Arc<Store>>,
    tokens: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    let found = store.find_user(&req.username, |user| {
        user.credentials()
            .map(|c| password::verify(&req.password, &c.hashword))
            .unwrap_or(false)
    });
    match found {
        Some(user) => {
            let score = store.get(user.id()).map(|entry| entry.score).unwrap_or(0);
            log::info!("[auth] {} signed in", user.id());
            granted(&tokens, &user, score)
        }
        None => HttpResponse::Unauthorized().body(AuthError::BadCredentials.to_string()),
    }
}

/// Creates a temporary account so spectators can play immediately.
pub async fn guest(
    store: web::Data<Arc<Store>>,
    tokens: web::Data<Crypto>,
    req: web::Json<GuestRequest>,
) -> impl Responder {
    if let Err(e) = require_filled(&req.display_name, "display name") {
        return HttpResponse::BadRequest().body(e.to_string());
    }
    match store.add_user(|id| User::Temporary {
        id,
        display_name: req.display_name.clone(),
    }) {
        Ok(user) => {
            log::info!("[auth] temporary user {} created", user.id());
            granted(&tokens, &user, 0)
        }
        Err(e) => rejected(e),
    }
}

/// Changes the caller's display name and reissues the token that
/// carries it.
pub async fn rename(
    store: web::Data<Arc<Store>>,
    tokens: web::Data<Crypto>,
    auth: Auth,
    req: web::Json<RenameRequest>,
) -> impl Responder {
    if let Err(e) = require_filled(&req.display_name, "display name") {
        return HttpResponse::BadRequest().body(e.to_string());
    }
    match store.update_user(auth.user(), |user| {
        Ok(user.clone().renamed(req.display_name.clone()))
    }) {
        Ok(user) => {
            let score = store.get(user.id()).map(|entry| entry.score).unwrap_or(0);
            granted(&tokens, &user, score)
        }
        Err(e) => rejected(e),
    }
}

/// Replaces the caller's password. Temporary accounts must register
/// first.
pub async fn change_password(
    store: web::Data<Arc<Store>>,
    tokens: web::Data<Crypto>,
    auth: Auth,
    req: web::Json<PasswordRequest>,
) -> impl Responder {
    if req.password.len() < 8 {
        return HttpResponse::BadRequest().body(AuthError::WeakPassword.to_string());
    }
    let hashword = match password::hash(&req.password) {
        Ok(h) => h,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    match store.update_user(auth.user(), |user| match user {
        User::Regular {
            id, display_name, credentials,
        } => Ok(User::Regular {
            id: *id,
            display_name: display_name.clone(),
            credentials: Credentials {
                name: credentials.name.clone(),
                hashword,
            },
        }),
        User::Temporary { .. } => Err(StorageError::NotRegistered),
    }) {
        Ok(user) => {
            let score = store.get(user.id()).map(|entry| entry.score).unwrap_or(0);
            granted(&tokens, &user, score)
        }
        Err(e) => rejected(e),
    }
}

/// The caller's directory record.
pub async fn me(store: web::Data<Arc<Store>>, auth: Auth) -> impl Responder {
    match store.get(auth.user()) {
        Some(entry) => HttpResponse::Ok().json(UserInfo {
            id: entry.user.id().to_string(),
            display_name: entry.user.display_name().to_string(),
            temporary: entry.user.is_temporary(),
            score: entry.score,
        }),
        None => HttpResponse::NotFound().body("account no longer exists"),
    }
}

/// Reissues a token before the current one expires.
pub async fn renew(
    store: web::Data<Arc<Store>>,
    tokens: web::Data<Crypto>,
    auth: Auth,
) -> impl Responder {
    match store.get(auth.user()) {
        Some(entry) => granted(&tokens, &entry.user, entry.score),
        None => HttpResponse::Unauthorized().body("account no longer exists"),
    }
}
