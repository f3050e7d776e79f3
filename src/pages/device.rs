use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// Landing view for topology navigation; shows which device was selected.
#[component]
pub fn DeviceDetail() -> impl IntoView {
	let params = use_params_map();
	let model = move || params.read().get("model").unwrap_or_default();

	view! {
		<div class="page device-detail">
			<h2>"Device " <span class="mono">{model}</span></h2>
			<p class="subtitle">"Hardware view for the selected device."</p>
			<a href="/">"\u{2190} Back to topology"</a>
		</div>
	}
}
