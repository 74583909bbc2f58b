//! Mirror of the auth provider's session state.

use std::time::Duration;

use secrecy::SecretBox;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    watch,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        self,
        user::{self, session::ExpirationDateTime},
    },
    infra::{
        auth::{self, CurrentSession, Event, SignIn, SignOut, SignUp, Subscribe},
        Auth,
    },
};

/// Signed in user, as seen by a [`Mirror`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    /// ID of this [`User`].
    pub id: user::Id,

    /// [`user::Email`] of this [`User`].
    pub email: user::Email,

    /// [`user::Name`] this [`User`] is displayed with.
    pub display_name: user::Name,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.name,
        }
    }
}

/// Authentication state of a [`Mirror`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum AuthState {
    /// Initial lookup of the session hasn't completed yet.
    #[default]
    Loading,

    /// [`User`] is signed in.
    Authenticated(User),

    /// Nobody is signed in.
    Anonymous,
}

impl AuthState {
    /// Indicates whether this is [`AuthState::Loading`].
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Indicates whether this is [`AuthState::Authenticated`].
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the signed in [`User`], if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(u) => Some(u),
            Self::Loading | Self::Anonymous => None,
        }
    }
}

/// Local mirror of an [`Auth`] provider's session.
///
/// Changes its [`AuthState`] only by processing the [`Event`]s pushed by the
/// provider, or once the mirrored session expires. The [`Mirror::login()`],
/// [`Mirror::signup()`] and [`Mirror::logout()`] operations merely forward to
/// the provider.
#[derive(Debug)]
pub struct Mirror<A> {
    /// Mirrored [`Auth`] provider.
    auth: A,

    /// [`Event`]s pushed by the provider.
    events: broadcast::Receiver<Event>,

    /// Current [`AuthState`].
    state: watch::Sender<AuthState>,

    /// [`DateTime`] when the mirrored session expires, if any.
    ///
    /// [`DateTime`]: common::DateTime
    expires_at: Option<ExpirationDateTime>,
}

impl<A> Mirror<A>
where
    A: Auth<
        Subscribe,
        Ok = broadcast::Receiver<Event>,
        Err = Traced<auth::Error>,
    >,
{
    /// Creates a new [`Mirror`] of the provided [`Auth`] provider in the
    /// [`AuthState::Loading`].
    ///
    /// Subscribes to the provider's [`Event`]s right away, so none of them is
    /// missed before [`Mirror::start()`].
    ///
    /// # Errors
    ///
    /// If failed to subscribe to the provider's [`Event`]s.
    pub async fn new(auth: A) -> Result<Self, Traced<auth::Error>> {
        let events = auth.execute(Subscribe).await.map_err(tracerr::wrap!())?;
        Ok(Self {
            auth,
            events,
            state: watch::Sender::new(AuthState::Loading),
            expires_at: None,
        })
    }
}

impl<A> Mirror<A> {
    /// Returns the current [`AuthState`].
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribes to [`AuthState`] changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Looks up an existing session at the provider once.
    ///
    /// Failing to look it up is not an error: the [`Mirror`] becomes
    /// [`AuthState::Anonymous`]. Does nothing if the [`AuthState`] is known
    /// already.
    pub async fn start(&mut self) -> AuthState
    where
        A: Auth<
            CurrentSession,
            Ok = Option<user::session::Authenticated>,
            Err = Traced<auth::Error>,
        >,
    {
        if !self.state.borrow().is_loading() {
            return self.state();
        }

        match self.auth.execute(CurrentSession).await {
            Ok(Some(session)) => self.apply(Event::SignedIn(session)),
            Ok(None) => self.apply(Event::SignedOut),
            Err(e) => {
                log::warn!("failed to look up auth session: {e}");
                self.apply(Event::SignedOut);
            }
        }
        self.state()
    }

    /// Waits for the next [`Event`] of the provider (or the mirrored session
    /// expiration) and applies it.
    ///
    /// Returns [`None`] once the provider stops pushing [`Event`]s.
    pub async fn process(&mut self) -> Option<AuthState> {
        loop {
            let expires_in = self
                .expires_at
                .as_ref()
                .map(ExpirationDateTime::remaining);

            let event = tokio::select! {
                res = self.events.recv() => match res {
                    Ok(ev) => ev,
                    Err(RecvError::Lagged(n)) => {
                        log::warn!("auth `Mirror` skipped {n} events");
                        continue;
                    }
                    Err(RecvError::Closed) => return None,
                },
                () = tokio::time::sleep(expires_in.unwrap_or(Duration::MAX)),
                    if expires_in.is_some() =>
                {
                    log::debug!("auth session expired");
                    Event::SignedOut
                }
            };

            self.apply(event);
            return Some(self.state());
        }
    }

    /// Keeps this [`Mirror`] in sync with the provider until it stops
    /// pushing [`Event`]s.
    pub async fn run(mut self)
    where
        A: Auth<
            CurrentSession,
            Ok = Option<user::session::Authenticated>,
            Err = Traced<auth::Error>,
        >,
    {
        _ = self.start().await;
        while self.process().await.is_some() {}
    }

    /// Signs in with the provided credentials.
    ///
    /// # Errors
    ///
    /// With the provider's error, as is.
    pub async fn login(
        &self,
        email: user::Email,
        password: SecretBox<user::Password>,
    ) -> Result<(), Traced<auth::Error>>
    where
        A: Auth<
            SignIn,
            Ok = user::session::Authenticated,
            Err = Traced<auth::Error>,
        >,
    {
        self.auth
            .execute(SignIn { email, password })
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }

    /// Registers a new account with the provided credentials.
    ///
    /// # Errors
    ///
    /// With the provider's error, as is.
    pub async fn signup(
        &self,
        email: user::Email,
        password: SecretBox<user::Password>,
        display_name: user::Name,
    ) -> Result<(), Traced<auth::Error>>
    where
        A: Auth<
            SignUp,
            Ok = Option<user::session::Authenticated>,
            Err = Traced<auth::Error>,
        >,
    {
        self.auth
            .execute(SignUp {
                email,
                password,
                name: display_name,
            })
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }

    /// Signs out of the current session.
    ///
    /// # Errors
    ///
    /// With the provider's error, as is.
    pub async fn logout(&self) -> Result<(), Traced<auth::Error>>
    where
        A: Auth<SignOut, Ok = (), Err = Traced<auth::Error>>,
    {
        self.auth.execute(SignOut).await.map_err(tracerr::wrap!())
    }

    /// Applies the provided [`Event`] to the [`AuthState`].
    fn apply(&mut self, event: Event) {
        let state = match event {
            Event::SignedIn(session) => {
                self.expires_at = Some(session.expires_at);
                AuthState::Authenticated(session.user.into())
            }
            Event::SignedOut => {
                self.expires_at = None;
                AuthState::Anonymous
            }
        };
        _ = self.state.send_replace(state);
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use secrecy::SecretBox;
    use tokio::sync::broadcast;
    use tracerr::Traced;

    use crate::{
        domain::{
            user::{
                self,
                session::{Authenticated, Token},
            },
            User,
        },
        infra::{
            auth::{
                self, CurrentSession, Event, SignIn, SignOut, Subscribe,
            },
            supabase, Auth,
        },
    };

    use super::{AuthState, Mirror};

    #[derive(Clone, Debug)]
    struct FakeAuth {
        events: broadcast::Sender<Event>,
        existing: Option<Authenticated>,
        reachable: bool,
    }

    impl FakeAuth {
        fn new(existing: Option<Authenticated>, reachable: bool) -> Self {
            Self {
                events: broadcast::channel(8).0,
                existing,
                reachable,
            }
        }

        fn push(&self, event: Event) {
            _ = self.events.send(event);
        }

        fn unreachable<T>(&self) -> Result<T, Traced<auth::Error>> {
            Err(tracerr::new!(auth::Error::from(supabase::Error::Api {
                status: 400,
                message: "Invalid login credentials".into(),
            })))
        }
    }

    impl Auth<Subscribe> for FakeAuth {
        type Ok = broadcast::Receiver<Event>;
        type Err = Traced<auth::Error>;

        async fn execute(&self, _: Subscribe) -> Result<Self::Ok, Self::Err> {
            Ok(self.events.subscribe())
        }
    }

    impl Auth<CurrentSession> for FakeAuth {
        type Ok = Option<Authenticated>;
        type Err = Traced<auth::Error>;

        async fn execute(
            &self,
            _: CurrentSession,
        ) -> Result<Self::Ok, Self::Err> {
            if !self.reachable {
                return self.unreachable();
            }
            Ok(self.existing.clone())
        }
    }

    impl Auth<SignIn> for FakeAuth {
        type Ok = Authenticated;
        type Err = Traced<auth::Error>;

        async fn execute(&self, op: SignIn) -> Result<Self::Ok, Self::Err> {
            if !self.reachable {
                return self.unreachable();
            }
            let session = session(op.email.as_ref(), Duration::from_secs(60));
            self.push(Event::SignedIn(session.clone()));
            Ok(session)
        }
    }

    impl Auth<SignOut> for FakeAuth {
        type Ok = ();
        type Err = Traced<auth::Error>;

        async fn execute(&self, _: SignOut) -> Result<Self::Ok, Self::Err> {
            self.push(Event::SignedOut);
            Ok(())
        }
    }

    fn session(email: &str, ttl: Duration) -> Authenticated {
        let email = email.parse::<user::Email>().unwrap();
        #[expect(unsafe_code, reason = "test token")]
        let token = unsafe { Token::new_unchecked("t".into()) };
        Authenticated {
            token,
            user: User {
                id: user::Id::new(),
                name: user::Name::from_email(&email),
                email,
                created_at: DateTime::now().coerce(),
            },
            expires_at: (DateTime::now() + ttl).coerce(),
        }
    }

    fn password() -> SecretBox<user::Password> {
        SecretBox::new(Box::new("secret123".parse().unwrap()))
    }

    #[tokio::test]
    async fn starts_loading_then_resolves_by_lookup() {
        let auth = FakeAuth::new(None, true);
        let mut mirror = Mirror::new(auth).await.unwrap();

        assert!(mirror.state().is_loading());
        assert_eq!(mirror.start().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn restores_existing_session() {
        let stored = session("jane@example.com", Duration::from_secs(60));
        let auth = FakeAuth::new(Some(stored.clone()), true);
        let mut mirror = Mirror::new(auth).await.unwrap();

        let state = mirror.start().await;

        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().id, stored.user.id);
    }

    #[tokio::test]
    async fn failed_lookup_is_anonymous() {
        let auth = FakeAuth::new(None, false);
        let mut mirror = Mirror::new(auth).await.unwrap();

        assert_eq!(mirror.start().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn follows_pushed_sign_in() {
        let auth = FakeAuth::new(None, true);
        let mut mirror = Mirror::new(auth.clone()).await.unwrap();
        _ = mirror.start().await;
        let mut states = mirror.subscribe();
        _ = states.borrow_and_update();

        let pushed = session("jane@example.com", Duration::from_secs(60));
        auth.push(Event::SignedIn(pushed.clone()));
        let state = mirror.process().await.unwrap();

        let user = state.user().unwrap();
        assert_eq!(user.id, pushed.user.id);
        assert_eq!(user.email.to_string(), "jane@example.com");
        assert_eq!(user.display_name.to_string(), "jane");
        assert!(states.has_changed().unwrap());
        assert!(states.borrow_and_update().is_authenticated());
        assert!(!states.has_changed().unwrap());
    }

    #[tokio::test]
    async fn follows_pushed_sign_out() {
        let stored = session("jane@example.com", Duration::from_secs(60));
        let auth = FakeAuth::new(Some(stored), true);
        let mut mirror = Mirror::new(auth.clone()).await.unwrap();
        assert!(mirror.start().await.is_authenticated());

        mirror.logout().await.unwrap();
        let state = mirror.process().await.unwrap();

        assert_eq!(state, AuthState::Anonymous);
        assert!(state.user().is_none());
    }

    #[tokio::test]
    async fn login_changes_state_only_through_event() {
        let auth = FakeAuth::new(None, true);
        let mut mirror = Mirror::new(auth).await.unwrap();
        _ = mirror.start().await;

        let email = "joe@example.com".parse().unwrap();
        mirror.login(email, password()).await.unwrap();
        assert_eq!(mirror.state(), AuthState::Anonymous);

        let state = mirror.process().await.unwrap();
        assert_eq!(state.user().unwrap().email.to_string(), "joe@example.com");
    }

    #[tokio::test]
    async fn login_failure_is_returned_unchanged() {
        let auth = FakeAuth::new(None, false);
        let mut mirror = Mirror::new(auth).await.unwrap();
        _ = mirror.start().await;

        let email = "joe@example.com".parse().unwrap();
        let err = mirror.login(email, password()).await.unwrap_err();

        assert_eq!(err.as_ref().message(), Some("Invalid login credentials"));
        assert_eq!(mirror.state(), AuthState::Anonymous);
    }

    #[tokio::test(start_paused = true)]
    async fn expires_session() {
        let stored = session("jane@example.com", Duration::from_secs(3600));
        let auth = FakeAuth::new(Some(stored), true);
        let mut mirror = Mirror::new(auth.clone()).await.unwrap();
        assert!(mirror.start().await.is_authenticated());

        assert_eq!(mirror.process().await, Some(AuthState::Anonymous));
    }
}
