use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Date, Function, Reflect};
use log::Level;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, Storage,
};
use yew::prelude::*;

use crate::config::{EducationEntry, Project, SiteConfig, Skill, SocialLink};
use crate::contact::{ContactDraft, ContactField, ContactIssue};
use crate::logging::{self, log_event, DEFAULT_LOG_LEVEL};
use crate::navigation::{NavigationController, Section, SectionScroller};
use crate::theme::{
    style_scope, StoreError, StyleScope, Theme, ThemeService, ThemeStore, DARK_CLASS, THEME_KEY,
};
use crate::typing::TypingAnimator;

const TIMELINE_STAGGER_MS: usize = 150;

fn js_error(error: JsValue) -> StoreError {
    StoreError::Backend(error.as_string().unwrap_or_else(|| format!("{error:?}")))
}

fn local_storage() -> Result<Storage, StoreError> {
    window()
        .ok_or(StoreError::Unavailable)?
        .local_storage()
        .map_err(js_error)?
        .ok_or(StoreError::Unavailable)
}

#[derive(Clone, Copy)]
struct LocalThemeStore;

impl ThemeStore for LocalThemeStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        local_storage()?.get_item(THEME_KEY).map_err(js_error)
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        local_storage()?.set_item(THEME_KEY, value).map_err(js_error)
    }
}

fn apply_style_scope(scope: StyleScope) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let _ = root.class_list().toggle_with_force(DARK_CLASS, scope.dark_class);
    let _ = root.set_attribute("data-theme", scope.data_theme);
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Swaps the style scope inside a view transition when the browser has one
/// and the user has not asked for reduced motion.
fn apply_style_scope_with_transition(scope: StyleScope) {
    let start_view_transition = (!prefers_reduced_motion())
        .then(|| window().and_then(|w| w.document()))
        .flatten()
        .map(JsValue::from)
        .and_then(|document| {
            let start = Reflect::get(&document, &JsValue::from_str("startViewTransition")).ok()?;
            let start = start.dyn_into::<Function>().ok()?;
            Some((document, start))
        });

    let Some((document, start)) = start_view_transition else {
        apply_style_scope(scope);
        return;
    };

    let swap = Closure::once_into_js(move || apply_style_scope(scope));
    if start.call1(&document, &swap).is_err() {
        apply_style_scope(scope);
    }
}

struct DocumentScroller;

impl SectionScroller for DocumentScroller {
    fn scroll_to(&self, id: &str) -> bool {
        let Some(element) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            return false;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(if prefers_reduced_motion() {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        });
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

fn open_mail_client(href: &str) {
    let Some(win) = window() else {
        return;
    };

    if let Err(error) = win.location().set_href(href) {
        log_event(
            Level::Warn,
            "contact.handoff_failed",
            json!({ "error": format!("{error:?}") }),
        );
    }
}

fn delay_millis(delay: std::time::Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

#[derive(Clone, PartialEq)]
struct ThemeContext {
    theme: Theme,
    toggle: Callback<()>,
}

#[derive(Properties, PartialEq)]
struct ThemeProviderProps {
    children: Children,
}

#[function_component(ThemeProvider)]
fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(|| ThemeService::new(LocalThemeStore).resolve());

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_style_scope(style_scope(current));
            || ()
        });
    }

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_: ()| {
            let next = ThemeService::new(LocalThemeStore).toggle(*theme);
            apply_style_scope_with_transition(style_scope(next));
            theme.set(next);
        })
    };

    let context = ThemeContext {
        theme: *theme,
        toggle,
    };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            {props.children.clone()}
        </ContextProvider<ThemeContext>>
    }
}

#[function_component(ThemeToggle)]
fn theme_toggle() -> Html {
    let Some(context) = use_context::<ThemeContext>() else {
        return html! {};
    };

    let onclick = {
        let toggle = context.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    html! {
        <button
            class="theme-toggle"
            type="button"
            aria-label={context.theme.toggle_label()}
            aria-pressed={context.theme.pressed().to_string()}
            onclick={onclick}
        >
            <span aria-hidden="true">{context.theme.icon()}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
    #[prop_or_default]
    icon: Option<AttrValue>,
    #[prop_or_default]
    class: Classes,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    let opens_tab = props.href.starts_with("http");

    html! {
        <a
            class={classes!("link", props.class.clone())}
            href={props.href.clone()}
            target={opens_tab.then_some("_blank")}
            rel={opens_tab.then_some("noopener noreferrer")}
        >
            if let Some(icon) = props.icon.clone() {
                <span class="link-icon" aria-hidden="true">{icon}</span>
            }
            {props.label.clone()}
            if opens_tab {
                <span class="sr-only">{" (opens in a new tab)"}</span>
            }
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct NavBarProps {
    brand: AttrValue,
    nav: NavigationController,
    on_navigate: Callback<Section>,
    on_toggle_menu: Callback<()>,
}

#[function_component(NavBar)]
fn nav_bar(props: &NavBarProps) -> Html {
    let nav_item = |section: Section, class: &'static str| {
        let on_navigate = props.on_navigate.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_navigate.emit(section));
        html! {
            <li>
                <button type="button" class={class} onclick={onclick}>{section.label()}</button>
            </li>
        }
    };

    let on_toggle = {
        let on_toggle_menu = props.on_toggle_menu.clone();
        Callback::from(move |_: MouseEvent| on_toggle_menu.emit(()))
    };
    let menu_open = props.nav.menu_open();

    html! {
        <nav class="site-nav" aria-label="Primary">
            <div class="nav-inner">
                <span class="nav-brand">{props.brand.clone()}</span>
                <ul class="nav-links">
                    { for Section::ALL.into_iter().map(|section| nav_item(section, "nav-link")) }
                </ul>
                <div class="nav-actions">
                    <ThemeToggle />
                    <button
                        class="menu-toggle"
                        type="button"
                        aria-controls="mobile-menu"
                        aria-expanded={menu_open.to_string()}
                        aria-label={if menu_open { "Close menu" } else { "Open menu" }}
                        onclick={on_toggle}
                    >
                        <span aria-hidden="true">{if menu_open { "✕" } else { "☰" }}</span>
                    </button>
                </div>
            </div>
            if menu_open {
                <ul id="mobile-menu" class="mobile-menu">
                    { for Section::ALL.into_iter().map(|section| nav_item(section, "mobile-link")) }
                </ul>
            }
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct TypedTitleProps {
    animator: TypingAnimator,
}

/// Runs the typing animator on one owned timer. Each new state drops the
/// previous `Timeout` (which cancels it) before scheduling the next step, and
/// unmounting drops the last one.
#[function_component(TypedTitle)]
fn typed_title(props: &TypedTitleProps) -> Html {
    let initial = props.animator.clone();
    let animator = use_state(move || initial);

    {
        let handle = animator.clone();
        use_effect_with((*animator).clone(), move |current| {
            let mut next = current.clone();
            let timeout = Timeout::new(delay_millis(current.next_delay()), move || {
                next.step();
                handle.set(next);
            });
            move || drop(timeout)
        });
    }

    html! {
        <span class="typed-title">
            <span class="sr-only">{animator.current_phrase().to_string()}</span>
            <span class="typed-text" aria-hidden="true">{animator.displayed().to_string()}</span>
            <span
                class={classes!("caret", (!animator.is_typing()).then_some("is-deleting"))}
                aria-hidden="true"
            >
                {"|"}
            </span>
        </span>
    }
}

#[derive(Properties, PartialEq)]
struct SiteProps {
    site: Rc<SiteConfig>,
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    site: Rc<SiteConfig>,
    on_navigate: Callback<Section>,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let owner = &props.site.owner;

    let on_contact = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Section::Contact))
    };

    let animator = use_memo(props.site.clone(), |site| site.animator().ok());
    let role = match animator.as_ref() {
        Some(animator) => html! { <TypedTitle animator={animator.clone()} /> },
        None => html! { <span>{owner.tagline.clone()}</span> },
    };

    html! {
        <section id={Section::Home.id()} class="hero" aria-labelledby="hero-heading">
            <div class="avatar" aria-hidden="true">
                <span>{owner.initials.clone()}</span>
            </div>
            <h1 id="hero-heading">
                {"Hi, I'm "}
                <span class="accent-text">{owner.name.clone()}</span>
            </h1>
            <p class="hero-role">{role}</p>
            <p class="hero-summary">{owner.summary.clone()}</p>
            <button class="button button-outline" type="button" onclick={on_contact}>
                {"Contact Me"}
            </button>
        </section>
    }
}

fn timeline_entry(index: usize, entry: &EducationEntry) -> Html {
    let style = format!("--delay: {}ms;", index * TIMELINE_STAGGER_MS);

    html! {
        <li class="timeline-entry" style={style}>
            <span class="timeline-dot" aria-hidden="true"></span>
            <p class="timeline-period">{entry.period.clone()}</p>
            <h4>{entry.title.clone()}</h4>
            <p class="muted">{entry.institution.clone()}</p>
            if let Some(detail) = entry.detail.clone() {
                <p class="timeline-detail">{detail}</p>
            }
        </li>
    }
}

#[function_component(AboutSection)]
fn about_section(props: &SiteProps) -> Html {
    let about = &props.site.about;

    html! {
        <section id={Section::About.id()} class="section" aria-labelledby="about-heading">
            <header class="section-header">
                <h2 id="about-heading">{"About Me"}</h2>
                <p class="muted">
                    {"Get to know more about my background, skills, and what drives me as a developer."}
                </p>
            </header>
            <div class="about-grid">
                <div class="about-copy">
                    <h3>{about.heading.clone()}</h3>
                    { for about.journey.iter().map(|paragraph| html! { <p>{paragraph.clone()}</p> }) }
                </div>
                if !about.education.is_empty() {
                    <div class="about-education">
                        <h3>{"Education"}</h3>
                        <ol class="timeline">
                            { for about.education.iter().enumerate().map(|(index, entry)| timeline_entry(index, entry)) }
                        </ol>
                    </div>
                }
            </div>
        </section>
    }
}

fn skill_bar(skill: &Skill) -> Html {
    html! {
        <li class="skill">
            <div class="skill-header">
                <span>{skill.name.clone()}</span>
                <span class="muted">{format!("{}%", skill.level)}</span>
            </div>
            <div
                class="skill-track"
                role="progressbar"
                aria-label={skill.name.clone()}
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow={skill.level.to_string()}
            >
                <div class="skill-fill" style={format!("--level: {}%;", skill.level)}></div>
            </div>
        </li>
    }
}

#[function_component(SkillsSection)]
fn skills_section(props: &SiteProps) -> Html {
    html! {
        <section id={Section::Skills.id()} class="section section-alt" aria-labelledby="skills-heading">
            <header class="section-header">
                <h2 id="skills-heading">{"Skills & Technologies"}</h2>
            </header>
            <ul class="skill-list">
                { for props.site.skills.iter().map(skill_bar) }
            </ul>
        </section>
    }
}

fn project_card(project: &Project) -> Html {
    html! {
        <article class="project-card">
            <div class="project-banner" style={format!("background: {};", project.accent)} aria-hidden="true"></div>
            <div class="project-body">
                <h3>{project.title.clone()}</h3>
                <p class="muted">{project.description.clone()}</p>
                <ul class="tag-list">
                    { for project.tags.iter().map(|tag| html! { <li class="tag">{tag.clone()}</li> }) }
                </ul>
                <div class="project-links">
                    if let Some(href) = project.code_url.clone() {
                        <ExternalLink href={href} label="Code" icon="⌥" />
                    }
                    if let Some(href) = project.demo_url.clone() {
                        <ExternalLink href={href} label="Live Demo" icon="↗" />
                    }
                </div>
            </div>
        </article>
    }
}

#[function_component(ProjectsSection)]
fn projects_section(props: &SiteProps) -> Html {
    html! {
        <section id={Section::Projects.id()} class="section" aria-labelledby="projects-heading">
            <header class="section-header">
                <h2 id="projects-heading">{"My Projects"}</h2>
                <p class="muted">
                    {"Here are some of the projects I've worked on. Each one represents a unique challenge and learning experience."}
                </p>
            </header>
            <div class="project-grid">
                { for props.site.projects.iter().map(project_card) }
            </div>
        </section>
    }
}

#[derive(Clone, Default, PartialEq)]
struct ContactFormState {
    draft: ContactDraft,
    issues: Vec<ContactIssue>,
    handed_off: bool,
}

impl ContactFormState {
    fn issue_for(&self, field: ContactField) -> Option<String> {
        self.issues
            .iter()
            .find(|issue| issue.field() == field)
            .map(ToString::to_string)
    }
}

#[function_component(ContactSection)]
fn contact_section(props: &SiteProps) -> Html {
    let form = use_state(ContactFormState::default);

    let on_input = |field: ContactField| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = match field {
                ContactField::Message => event.target_unchecked_into::<HtmlTextAreaElement>().value(),
                ContactField::Name | ContactField::Email => {
                    event.target_unchecked_into::<HtmlInputElement>().value()
                }
            };

            let mut next = (*form).clone();
            next.draft.set(field, value);
            next.issues.retain(|issue| issue.field() != field);
            next.handed_off = false;
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let recipient = props.site.contact.email.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let mut next = (*form).clone();
            match next.draft.mailto_href(&recipient) {
                Ok(href) => {
                    log_event(Level::Info, "contact.handoff", json!({ "client": "mailto" }));
                    open_mail_client(&href);
                    next.issues.clear();
                    next.handed_off = true;
                }
                Err(issues) => {
                    log_event(
                        Level::Debug,
                        "contact.rejected",
                        json!({ "issues": issues.len() }),
                    );
                    next.issues = issues;
                    next.handed_off = false;
                }
            }
            form.set(next);
        })
    };

    let name_issue = form.issue_for(ContactField::Name);
    let email_issue = form.issue_for(ContactField::Email);
    let message_issue = form.issue_for(ContactField::Message);

    html! {
        <section id={Section::Contact.id()} class="section section-alt" aria-labelledby="contact-heading">
            <header class="section-header">
                <h2 id="contact-heading">{"Get In Touch"}</h2>
                <p class="muted">{props.site.contact.intro.clone()}</p>
            </header>
            <form class="contact-form" onsubmit={onsubmit}>
                <div class="form-row">
                    <div class="form-field">
                        <label for="name">{"Name"}</label>
                        <input
                            type="text"
                            id="name"
                            placeholder="Your Name"
                            value={form.draft.name.clone()}
                            aria-invalid={name_issue.is_some().to_string()}
                            oninput={on_input(ContactField::Name)}
                        />
                        if let Some(issue) = name_issue {
                            <p class="field-error">{issue}</p>
                        }
                    </div>
                    <div class="form-field">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="your@email.com"
                            value={form.draft.email.clone()}
                            aria-invalid={email_issue.is_some().to_string()}
                            oninput={on_input(ContactField::Email)}
                        />
                        if let Some(issue) = email_issue {
                            <p class="field-error">{issue}</p>
                        }
                    </div>
                </div>
                <div class="form-field">
                    <label for="message">{"Message"}</label>
                    <textarea
                        id="message"
                        rows="6"
                        placeholder="Tell me about your project or just say hi!"
                        value={form.draft.message.clone()}
                        aria-invalid={message_issue.is_some().to_string()}
                        oninput={on_input(ContactField::Message)}
                    />
                    if let Some(issue) = message_issue {
                        <p class="field-error">{issue}</p>
                    }
                </div>
                <button class="button button-primary" type="submit">{"Send Message"}</button>
                if form.handed_off {
                    <p class="form-status" role="status">
                        {"Your mail app should open with the message ready to send."}
                    </p>
                }
            </form>
        </section>
    }
}

fn social_item(link: &SocialLink) -> Html {
    html! {
        <li>
            <ExternalLink
                class="social-link"
                href={link.href.clone()}
                label={link.label.clone()}
                icon={link.kind.icon()}
            />
        </li>
    }
}

#[function_component(SiteFooter)]
fn site_footer(props: &SiteProps) -> Html {
    let year = Date::new_0().get_full_year();

    html! {
        <footer class="site-footer">
            <ul class="social-list">
                { for props.site.socials.iter().map(social_item) }
            </ul>
            <p class="muted">
                {format!("© {year} {}. All rights reserved. Built with Rust and Yew.", props.site.owner.name)}
            </p>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub site: Rc<SiteConfig>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let nav = use_state(NavigationController::default);

    let on_navigate = {
        let nav = nav.clone();
        Callback::from(move |section: Section| {
            let mut next = *nav;
            next.navigate_to(section.id(), &DocumentScroller);
            nav.set(next);
        })
    };

    let on_toggle_menu = {
        let nav = nav.clone();
        Callback::from(move |_: ()| {
            let mut next = *nav;
            next.toggle_menu();
            nav.set(next);
        })
    };

    let site = props.site.clone();

    html! {
        <ThemeProvider>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <NavBar
                brand={site.owner.brand.clone()}
                nav={*nav}
                on_navigate={on_navigate.clone()}
                on_toggle_menu={on_toggle_menu}
            />
            <main id="content">
                <Hero site={site.clone()} on_navigate={on_navigate} />
                <AboutSection site={site.clone()} />
                <SkillsSection site={site.clone()} />
                <ProjectsSection site={site.clone()} />
                <ContactSection site={site.clone()} />
            </main>
            <SiteFooter site={site} />
        </ThemeProvider>
    }
}

pub fn run() {
    let (site, load_error) = SiteConfig::load();
    let level = site.log_level();
    logging::init(level.as_ref().copied().unwrap_or(DEFAULT_LOG_LEVEL));

    if let Err(error) = level {
        log_event(Level::Warn, "config.log_level", json!({ "error": error.to_string() }));
    }
    if let Some(error) = load_error {
        log_event(
            Level::Error,
            "config.fallback",
            json!({ "error": error.to_string() }),
        );
    }

    let props = AppProps {
        site: Rc::new(site),
    };
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));

    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, props).render();
        }
        None => {
            log_event(Level::Warn, "page.mount_fallback", json!({ "root": "body" }));
            yew::Renderer::<App>::with_props(props).render();
        }
    }

    log_event(
        Level::Info,
        "page.mounted",
        json!({ "sections": Section::ALL.len() }),
    );
}
