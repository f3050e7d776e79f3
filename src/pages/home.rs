use leptos::prelude::*;

use crate::components::topology::{Severity, TopologyCanvas, TopologyData, TopologyError};

/// Topology page: legend plus the interactive canvas.
#[component]
pub fn Home() -> impl IntoView {
	let source = TopologyData::sample();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="page topology">
				<div class="topology-header">
					<h2>"Logical Topology"</h2>
					<div class="legend">
						{[Severity::Normal, Severity::Warning, Severity::Danger]
							.into_iter()
							.map(|severity| {
								view! {
									<span class="legend-item">
										<span
											class="legend-dot"
											style=format!("background-color: {};", severity.color())
										/>
										{severity.label()}
									</span>
								}
							})
							.collect_view()}
					</div>
				</div>
				{source
					.map(|data| {
						let data = Signal::derive(move || data.clone());
						view! {
							<div class="topology-stage">
								<TopologyCanvas data=data />
							</div>
						}
					})
					.map_err(|err: TopologyError| {
						log::error!("topology source unavailable: {}", err);
						err
					})}
			</div>
		</ErrorBoundary>
	}
}
