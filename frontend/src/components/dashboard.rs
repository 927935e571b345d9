use leptos::prelude::*;

use super::Layout;
use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let profile = auth
        .session()
        .user_id
        .map(|user_id| AppRoute::Profile { user_id });

    view! {
        <Layout>
            <div class="text-center">
                <h1 class="text-4xl font-extrabold text-primary">"Painel"</h1>
                <p class="text-base-content/70 mt-2">"Gerencie o ministério de louvor em um só lugar."</p>
            </div>

            <div class="grid gap-4 md:grid-cols-3">
                <DashboardCard
                    route=AppRoute::Departments
                    title="Departamentos"
                    description="Equipes, membros e escalas."
                />
                <DashboardCard
                    route=AppRoute::Songs
                    title="Repertório"
                    description="Músicas e suas versões."
                />
                {profile.map(|route| view! {
                    <DashboardCard route=route title="Meu perfil" description="Seus dados e departamento." />
                })}
            </div>
        </Layout>
    }
}

#[component]
fn DashboardCard(route: AppRoute, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <Link route=route class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                <p class="text-base-content/70">{description}</p>
            </div>
        </Link>
    }
}
