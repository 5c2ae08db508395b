use iced::widget::{button, column, container, text, Column};
use iced::{Alignment, Length};
use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod media;
mod state;
mod ui;

use api::cache::{QueryCache, QueryKey};
use api::products::CreateProductResponse;
use api::ApiClient;
use config::Config;
use media::{PreviewCache, PreviewId, RenderJob};
use state::data::{Category, CategoryId, SelectedFile};
use state::form::ListingForm;
use state::listing::DraftField;

/// Errors that stop the application from starting
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("could not create API client: {0}")]
    Api(#[from] api::ApiError),
    #[error("could not open preview cache: {0}")]
    Preview(#[from] media::preview::PreviewError),
    #[error(transparent)]
    Ui(#[from] iced::Error),
}

/// Which screen is showing
#[derive(Debug)]
enum Screen {
    Home,
    /// The listing form is mounted; dropping it unmounts
    Listing(ListingForm),
}

/// Main application state
struct ListingEditor {
    api: ApiClient,
    /// Preview thumbnails for staged images
    previews: PreviewCache,
    /// Category list shared across form mounts
    categories: QueryCache<Vec<Category>>,
    screen: Screen,
    /// Bumped on every mount
    generation: u64,
    /// Status message shown on the home screen
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User opened the listing form
    NewListing,
    /// User left the form without posting
    CancelListing,
    /// Category fetch for the mount `generation` finished
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<Category>, String>,
    },
    CategoryToggled(CategoryId, bool),
    DraftEdited(DraftField, String),
    /// User clicked the "+" tile
    PickImages,
    RemoveImage(usize),
    /// Background thumbnail rendering finished
    PreviewRendered(PreviewId, Result<PathBuf, String>),
    /// User closed the "too many images" dialog
    DismissOverflow,
    Submit,
    SubmitFinished {
        generation: u64,
        result: Result<CreateProductResponse, String>,
    },
}

impl ListingEditor {
    fn new(api: ApiClient, previews: PreviewCache) -> Self {
        info!(api = api.base_url(), previews = %previews.dir().display(), "listing editor initialized");

        ListingEditor {
            api,
            previews,
            categories: QueryCache::new(),
            screen: Screen::Home,
            generation: 0,
            status: "Ready.".to_string(),
        }
    }

    fn form_mut(&mut self) -> Option<&mut ListingForm> {
        match &mut self.screen {
            Screen::Listing(form) => Some(form),
            Screen::Home => None,
        }
    }

    /// The mounted form, if it belongs to mount `generation`
    fn form_for(&mut self, generation: u64) -> Option<&mut ListingForm> {
        self.form_mut().filter(|form| form.generation() == generation)
    }

    /// Mount a fresh listing form.
    /// Returns the mount's generation if its categories still have to be fetched.
    fn mount_listing(&mut self) -> Option<u64> {
        self.generation += 1;
        let generation = self.generation;
        let form = ListingForm::mount(generation, &self.categories);
        let needs_fetch = form.needs_categories();
        self.screen = Screen::Listing(form);

        needs_fetch.then_some(generation)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NewListing => {
                let Some(generation) = self.mount_listing() else {
                    return Task::none();
                };

                let api = self.api.clone();
                Task::perform(
                    async move { api.fetch_categories().await.map_err(|e| e.to_string()) },
                    move |result| Message::CategoriesLoaded { generation, result },
                )
            }
            Message::CancelListing => {
                // Dropping the form releases every staged preview
                self.screen = Screen::Home;
                self.status = "Listing discarded.".to_string();
                Task::none()
            }
            Message::CategoriesLoaded { generation, result } => {
                // Successful results fill the cache even if the form is gone
                let result = result.map(|categories| self.categories.insert(QueryKey::Categories, categories));

                match self.form_for(generation) {
                    Some(form) => form.categories_resolved(result),
                    None => debug!(generation, "category fetch finished after unmount"),
                }
                Task::none()
            }
            Message::CategoryToggled(id, checked) => {
                if let Some(form) = self.form_mut() {
                    if let Err(e) = form.toggle_category(&id, checked) {
                        warn!(error = %e, "ignored category toggle");
                    }
                }
                Task::none()
            }
            Message::DraftEdited(field, value) => {
                if let Some(form) = self.form_mut() {
                    form.draft.set(field, value);
                }
                Task::none()
            }
            Message::PickImages => {
                let Screen::Listing(form) = &mut self.screen else {
                    return Task::none();
                };

                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select Photos")
                    .pick_files();

                let Some(paths) = picked else {
                    return Task::none();
                };

                let files: Vec<SelectedFile> = paths.into_iter().map(SelectedFile::from_path).collect();
                let outcome = form.uploads.add(files, &mut self.previews);
                info!(
                    added = outcome.added(),
                    dropped = outcome.dropped,
                    staged = form.uploads.len(),
                    "images selected"
                );

                Task::batch(outcome.jobs.into_iter().map(render_preview))
            }
            Message::RemoveImage(index) => {
                if let Some(form) = self.form_mut() {
                    form.uploads.remove(index);
                }
                Task::none()
            }
            Message::PreviewRendered(id, result) => {
                match result {
                    Ok(path) => {
                        let owned = self
                            .form_mut()
                            .is_some_and(|form| form.uploads.mark_preview_ready(id));
                        if !owned {
                            // The handle was released while rendering
                            media::preview::release_thumbnail(&path);
                        }
                    }
                    Err(e) => warn!(preview = %id, error = %e, "no preview for staged file"),
                }
                Task::none()
            }
            Message::DismissOverflow => {
                if let Some(form) = self.form_mut() {
                    form.uploads.dismiss_overflow();
                }
                Task::none()
            }
            Message::Submit => {
                let Screen::Listing(form) = &mut self.screen else {
                    return Task::none();
                };

                let request = match form.request() {
                    Ok(request) => request,
                    Err(e) => {
                        form.error = Some(e.to_string());
                        return Task::none();
                    }
                };

                form.error = None;
                form.submitting = true;
                info!(title = %request.title, categories = request.category_ids.len(), "posting listing");

                let generation = form.generation();
                let api = self.api.clone();
                Task::perform(
                    async move { api.create_product(&request).await.map_err(|e| e.to_string()) },
                    move |result| Message::SubmitFinished { generation, result },
                )
            }
            Message::SubmitFinished { generation, result } => {
                let Some(form) = self.form_for(generation) else {
                    return Task::none();
                };

                match result {
                    Ok(created) => {
                        self.status = format!("✅ Posted \"{}\" (listing {}).", created.title, created.product_id);
                        self.screen = Screen::Home;
                    }
                    Err(e) => {
                        warn!(error = %e, "posting listing failed");
                        form.submitting = false;
                        form.error = Some(format!("Could not post listing: {e}"));
                    }
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        if let Screen::Listing(form) = &self.screen {
            return ui::listing_form::view(form);
        }

        let content: Column<'_, Message> = column![
            text("Listing Editor").size(48),
            button("New Listing")
                .on_press(Message::NewListing)
                .padding(10),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Render one thumbnail in the background and report back
fn render_preview(job: RenderJob) -> Task<Message> {
    let id = job.id;
    Task::perform(
        async move { job.run().await.map_err(|e| e.to_string()) },
        move |result| Message::PreviewRendered(id, result),
    )
}

fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let api = ApiClient::new(&config)?;
    let previews = PreviewCache::open()?;
    let app = ListingEditor::new(api, previews);

    iced::application("Listing Editor", ListingEditor::update, ListingEditor::view)
        .theme(ListingEditor::theme)
        .centered()
        .run_with(move || (app, Task::none()))?;

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        error!(error = %e, "listing editor exited with an error");
        std::process::exit(1);
    }
}
