//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, catcher::Catcher, prelude::*};
use uuid::Uuid;

use quire::users::Role;
use quire_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        books::MockBooksService,
        carts::MockCartsService,
        orders::MockOrdersService,
        users::{MockUsersService, data::Actor, records::UserUuid},
    },
};

use crate::{auth::CookieSettings, envelope::error_envelope, state::State};

pub(crate) const TEST_USER: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn customer() -> Actor {
    Actor {
        user: TEST_USER,
        role: Role::Customer,
    }
}

pub(crate) fn admin() -> Actor {
    Actor {
        user: TEST_USER,
        role: Role::Admin,
    }
}

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub users: MockUsersService,
    pub books: MockBooksService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            users: Arc::new(self.users),
            books: Arc::new(self.books),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        };

        State::shared(app, CookieSettings { secure: true })
    }
}

/// Serve `route` with the mocked state, `actor` signed in when given, and
/// the error envelope catcher.
pub(crate) fn service(mocks: Mocks, actor: Option<Actor>, route: Router) -> Service {
    let mut router = Router::new().hoop(inject(mocks.into_state()));

    if let Some(actor) = actor {
        router = router.hoop(inject(actor));
    }

    Service::new(router.push(route)).catcher(Catcher::default().hoop(error_envelope))
}
