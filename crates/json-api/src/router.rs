//! App Router

use salvo::Router;

use crate::{auth, books, cart, orders};

/// Every `/api` route. Public routes sit beside the authenticated groups;
/// the session middleware only guards the groups it is hooped on.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(auth_router())
        .push(books_router())
        .push(cart_router())
        .push(orders_router())
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(Router::with_path("logout").post(auth::logout::handler))
        .push(
            Router::with_path("me")
                .hoop(auth::middleware::handler)
                .get(auth::me::handler),
        )
}

fn books_router() -> Router {
    Router::with_path("books")
        .push(Router::with_path("get-all-books").get(books::index::handler))
        .push(Router::with_path("search").get(books::search::handler))
        .push(Router::with_path("get-books-by-genre").get(books::by_genre::handler))
        .push(Router::with_path("get-trending-books").get(books::trending::handler))
        .push(Router::with_path("get-best-selling-books").get(books::best_selling::handler))
        .push(Router::with_path("recently-ordered-books").get(books::recently_ordered::handler))
        .push(Router::with_path("get-related-books/{id}").get(books::related::handler))
        .push(Router::with_path("get-book-by-id/{id}").get(books::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("get-user-books/{page}").get(books::user_books::handler))
                .push(Router::with_path("create").post(books::create::handler))
                .push(Router::with_path("update-book/{id}").put(books::update::handler))
                .push(Router::with_path("delete-book/{id}").delete(books::delete::handler)),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .hoop(auth::middleware::handler)
        .push(Router::with_path("get-cart").get(cart::get::handler))
        .push(Router::with_path("add-to-cart/{book}").post(cart::add::handler))
        .push(Router::with_path("update-cart/{book}").put(cart::update::handler))
        .push(Router::with_path("remove-book/{book}").delete(cart::remove::handler))
        .push(Router::with_path("delete/{book}").delete(cart::remove::handler))
        .push(Router::with_path("clear-cart").delete(cart::clear::handler))
        .push(Router::with_path("clear-cart/{id}").delete(cart::clear::handler))
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .hoop(auth::middleware::handler)
        .push(Router::with_path("create-order").post(orders::create::handler))
        .push(Router::with_path("get-user-orders").get(orders::index::handler))
        .push(Router::with_path("get-order-by-id/{id}").get(orders::get::handler))
        .push(Router::with_path("update-order/{id}").put(orders::update_status::handler))
        .push(
            Router::with_path("update-payment-status/{id}")
                .put(orders::update_payment::handler),
        )
        .push(Router::with_path("remove-order/{id}").delete(orders::remove::handler))
}
