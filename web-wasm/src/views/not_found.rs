//! 404

use leptos::prelude::*;

use crate::router::Link;

#[component]
pub fn NotFoundView() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Error 404 - Page Not Found"</h1>
            <p>"The page you were looking for wasn't found."</p>
            <Link href="/" class="btn btn-primary">"Go to homepage"</Link>
        </section>
    }
}
