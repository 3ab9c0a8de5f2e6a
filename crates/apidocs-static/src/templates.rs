//! Template engine for rendering documentation pages.

use apidocs_nav::ResolvedLink;
use minijinja::Environment;

/// The sidebar of one page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Sidebar {
    /// Text shown when there is no logo
    pub title: String,
    /// Logo image URL
    pub logo: Option<String>,
    /// Link target of the logo/title
    pub home: String,
    /// Menu resolved against the page being rendered
    pub links: Vec<ResolvedLink>,
}

/// A table of contents entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Page description for the meta tag
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Sidebar navigation
    pub sidebar: Sidebar,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    /// Stylesheet URLs, in order
    pub stylesheets: Vec<String>,
    /// Script URLs, in order
    pub scripts: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");
        env.add_template("doc.html", DOC_TEMPLATE)
            .expect("Failed to add doc template");
        env.add_template("404.html", NOT_FOUND_TEMPLATE)
            .expect("Failed to add 404 template");
        env.add_template("sidebar.html", SIDEBAR_TEMPLATE)
            .expect("Failed to add sidebar template");
        env.add_template("link.html", LINK_TEMPLATE)
            .expect("Failed to add link template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {%- if description %}
  <meta name="description" content="{{ description }}">
  {%- endif %}
  {%- for href in stylesheets %}
  <link rel="stylesheet" href="{{ href }}">
  {%- endfor %}
</head>
<body>
  <header class="topbar">
    <button class="menu-btn" type="button" aria-label="Toggle navigation">&#9776;</button>
    <a href="{{ sidebar.home }}" class="topbar-title">{{ sidebar.title }}</a>
  </header>
  <div class="layout">
    {% include "sidebar.html" %}
    <main class="main-content">
      {% block content %}{% endblock %}
    </main>
  </div>
  {%- for src in scripts %}
  <script src="{{ src }}"></script>
  {%- endfor %}
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  {{ content | safe }}
</article>

{% if toc | length > 1 %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>
{% endif %}
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc not-found">
  <h1>404</h1>
  <p>This page could not be found.</p>
  <p><a href="{{ sidebar.home }}">Back to the documentation</a></p>
</article>
{% endblock %}"##;

const SIDEBAR_TEMPLATE: &str = r##"<nav class="sidebar">
  <div class="sidebar-header">
    <a href="{{ sidebar.home }}" class="sidebar-logo">
    {%- if sidebar.logo %}
      <img src="{{ sidebar.logo }}" alt="{{ sidebar.title }}">
    {%- else %}
      <span class="sidebar-title">{{ sidebar.title }}</span>
    {%- endif %}
    </a>
  </div>
  <ul class="nav-list">
  {%- for item in sidebar.links %}
    <li class="nav-item{% if item.active %} active{% endif %}{% if item.expanded %} expanded{% endif %}">
      {% include "link.html" %}
      {%- if item.children %}
      <ul class="nav-children">
      {%- for item in item.children %}
        <li class="nav-item{% if item.active %} active{% endif %}">
          {% include "link.html" %}
        </li>
      {%- endfor %}
      </ul>
      {%- endif %}
    </li>
  {%- endfor %}
  </ul>
</nav>"##;

const LINK_TEMPLATE: &str = r##"<a href="{{ item.href }}"
  {%- if item.active %} aria-current="page"{% endif %}
  {%- if item.target %} target="{{ item.target }}"{% endif %}
  {%- if item.rel %} rel="{{ item.rel }}"{% endif %}>{{ item.label }}</a>"##;
