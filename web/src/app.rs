use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::views::reservation::ReservationPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="es">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/canchitas-web.css"/>
        <Title text="Crear reservación"/>

        <ConfigProvider>
            <Router>
                <main>
                    <Routes fallback=|| "Página no encontrada.".into_view()>
                        <Route path=StaticSegment("") view=ReservationPage/>
                        <Route path=StaticSegment("reservacion") view=ReservationPage/>
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
