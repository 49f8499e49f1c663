//! Server-rendered HTML pages.
//!
//! Landing, registration, login and the per-user hobby page. Every form
//! posts `application/x-www-form-urlencoded` with the field names the
//! handlers expect.

const SHARED_STYLES: &str = r#"
:root {
    --accent: #3b3fe3;
    --accent-light: #5e85ff;
    --danger: #d9480f;
    --surface: #f8f9fe;
    --card: #ffffff;
    --text: #1c1f40;
    --text-dimmed: #6c757d;
    --radius: 8px;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: var(--surface);
    color: var(--text);
    min-height: 100vh;
    display: flex;
    justify-content: center;
    align-items: flex-start;
    padding-top: 4rem;
    line-height: 1.5;
}

.container { width: 100%; max-width: 480px; padding: 1rem; }

.card {
    background: var(--card);
    border-radius: var(--radius);
    box-shadow: 0 2px 12px rgba(28, 31, 64, 0.08);
    padding: 1.5rem;
}

.card-title { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }

.form-group { margin-bottom: 1rem; }
.form-label { display: block; font-size: 0.875rem; margin-bottom: 0.25rem; }
.form-input {
    width: 100%;
    padding: 0.5rem 0.75rem;
    border: 1px solid #ced4da;
    border-radius: var(--radius);
}

.btn {
    padding: 0.5rem 1rem;
    border: none;
    border-radius: var(--radius);
    cursor: pointer;
    font-weight: 500;
}
.btn-primary { background: var(--accent); color: #fff; }
.btn-primary:hover { background: var(--accent-light); }
.btn-danger { background: var(--danger); color: #fff; }
.btn-link { background: none; color: var(--accent); }

.hobbies { list-style: none; margin: 1rem 0; }
.hobbies li {
    display: flex;
    gap: 0.5rem;
    align-items: center;
    padding: 0.5rem 0;
    border-bottom: 1px solid #e9ecef;
}
.hobbies li .label { flex: 1; }
.hobbies form { display: flex; gap: 0.25rem; }
.empty { color: var(--text-dimmed); font-style: italic; }
.links { display: flex; gap: 1rem; margin-top: 1rem; }
"#;

/// Base HTML template wrapper.
fn html_page(title: &str, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + SHARED_STYLES.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>");
    html.push_str(&html_escape(title));
    html.push_str(" - HobbyHub</title>\n");
    html.push_str("    <style>");
    html.push_str(SHARED_STYLES);
    html.push_str("</style>\n</head>\n<body>\n    <div class=\"container\">\n");
    html.push_str(content);
    html.push_str("\n    </div>\n</body>\n</html>");
    html
}

/// Username and password fields shared by the register and login forms.
fn credential_fields(content: &mut String, password_autocomplete: &str) {
    content.push_str("<div class=\"form-group\">\n");
    content.push_str("<label class=\"form-label\" for=\"username\">Username</label>\n");
    content.push_str(
        "<input type=\"text\" id=\"username\" name=\"username\" class=\"form-input\" required autocomplete=\"username\">\n",
    );
    content.push_str("</div>\n\n");

    content.push_str("<div class=\"form-group\">\n");
    content.push_str("<label class=\"form-label\" for=\"password\">Password</label>\n");
    content.push_str(
        "<input type=\"password\" id=\"password\" name=\"password\" class=\"form-input\" required autocomplete=\"",
    );
    content.push_str(password_autocomplete);
    content.push_str("\">\n</div>\n\n");
}

/// Landing page, also shown after logout.
pub fn render_index() -> String {
    let mut content = String::with_capacity(512);
    content.push_str("<div class=\"card\">\n");
    content.push_str("<div class=\"card-title\">HobbyHub</div>\n");
    content.push_str("<p>Keep track of the things you like doing.</p>\n");
    content.push_str("<div class=\"links\">\n");
    content.push_str("<a class=\"btn btn-primary\" href=\"/register\">Register</a>\n");
    content.push_str("<a class=\"btn btn-link\" href=\"/login\">Log in</a>\n");
    content.push_str("</div>\n</div>");
    html_page("Welcome", &content)
}

/// Registration form, posts to `/register`.
pub fn render_register() -> String {
    let mut content = String::with_capacity(1024);
    content.push_str("<div class=\"card\">\n");
    content.push_str("<div class=\"card-title\">Create an account</div>\n");
    content.push_str("<form method=\"POST\" action=\"/register\">\n");
    credential_fields(&mut content, "new-password");
    content.push_str("<button type=\"submit\" class=\"btn btn-primary\">Register</button>\n");
    content.push_str("</form>\n");
    content.push_str("<div class=\"links\"><a href=\"/login\">Already registered? Log in</a></div>\n");
    content.push_str("</div>");
    html_page("Register", &content)
}

/// Login form, posts to `/signup`.
pub fn render_login() -> String {
    let mut content = String::with_capacity(1024);
    content.push_str("<div class=\"card\">\n");
    content.push_str("<div class=\"card-title\">Log in</div>\n");
    content.push_str("<form method=\"POST\" action=\"/signup\">\n");
    credential_fields(&mut content, "current-password");
    content.push_str("<button type=\"submit\" class=\"btn btn-primary\">Log in</button>\n");
    content.push_str("</form>\n");
    content.push_str("<div class=\"links\"><a href=\"/register\">No account yet? Register</a></div>\n");
    content.push_str("</div>");
    html_page("Log in", &content)
}

/// Per-user page listing hobbies with add, rename and delete forms.
///
/// Each form carries the username in a hidden `user` field.
pub fn render_home(username: &str, hobbies: &[String]) -> String {
    let user = html_escape(username);
    let mut content = String::with_capacity(1024 + hobbies.len() * 512);

    content.push_str("<div class=\"card\">\n");
    content.push_str("<div class=\"card-title\">Hello, ");
    content.push_str(&user);
    content.push_str("</div>\n");

    if hobbies.is_empty() {
        content.push_str("<p class=\"empty\">No hobbies yet.</p>\n");
    } else {
        content.push_str("<ul class=\"hobbies\">\n");
        for hobby in hobbies {
            let task = html_escape(hobby);
            content.push_str("<li>\n<span class=\"label\">");
            content.push_str(&task);
            content.push_str("</span>\n");

            content.push_str("<form method=\"POST\" action=\"/edit\">\n");
            push_hidden(&mut content, "user", &user);
            push_hidden(&mut content, "oldtask", &task);
            content.push_str("<input type=\"text\" name=\"newtask\" class=\"form-input\" value=\"");
            content.push_str(&task);
            content.push_str("\" required>\n");
            content.push_str("<button type=\"submit\" class=\"btn btn-link\">Rename</button>\n");
            content.push_str("</form>\n");

            content.push_str("<form method=\"POST\" action=\"/delete\">\n");
            push_hidden(&mut content, "user", &user);
            push_hidden(&mut content, "task", &task);
            content.push_str("<button type=\"submit\" class=\"btn btn-danger\">Delete</button>\n");
            content.push_str("</form>\n</li>\n");
        }
        content.push_str("</ul>\n");
    }

    content.push_str("<form method=\"POST\" action=\"/add\">\n");
    push_hidden(&mut content, "user", &user);
    content.push_str("<div class=\"form-group\">\n");
    content.push_str(
        "<input type=\"text\" name=\"task\" class=\"form-input\" placeholder=\"New hobby\" required>\n",
    );
    content.push_str("</div>\n");
    content.push_str("<button type=\"submit\" class=\"btn btn-primary\">Add</button>\n");
    content.push_str("</form>\n\n");

    content.push_str("<form method=\"POST\" action=\"/logout\" class=\"links\">\n");
    content.push_str("<button type=\"submit\" class=\"btn btn-link\">Log out</button>\n");
    content.push_str("</form>\n</div>");

    html_page("Your hobbies", &content)
}

// `value` must already be escaped.
fn push_hidden(content: &mut String, name: &str, value: &str) {
    content.push_str("<input type=\"hidden\" name=\"");
    content.push_str(name);
    content.push_str("\" value=\"");
    content.push_str(value);
    content.push_str("\">\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
