//! JavaScript evaluation scripts.
//!
//! This module contains the JavaScript code used to pull text, images,
//! structure, and links out of a rendered page.

/// Concatenated trimmed text of all body elements in document order.
pub const TEXT_SCRIPT: &str = r"
    (() => {
        const elements = Array.from(document.querySelectorAll('body *'));
        return elements
            .map(el => el.textContent ? el.textContent.trim() : '')
            .filter(Boolean)
            .join('\n');
    })()
";

/// Absolute http(s) image URLs in document order.
pub const IMAGES_SCRIPT: &str = r"
    (() => {
        return Array.from(document.images)
            .map(img => img.src)
            .filter(src => src && src.startsWith('http'));
    })()
";

/// Structural outline: title, meta description, content sections with
/// their first heading, candidate project blocks, and page-level
/// skill/contact text.
pub const OUTLINE_SCRIPT: &str = r#"
    (() => {
        const heading = el => {
            const h = el.querySelector('h1, h2, h3, h4, h5, h6');
            return h && h.textContent ? h.textContent.trim() : '';
        };
        const text = el => el.textContent ? el.textContent.trim() : '';

        const sections = Array.from(document.querySelectorAll(
            'section, article, .section, .project, .case-study, .portfolio-item'
        )).map(section => ({
            title: heading(section),
            content: text(section),
            type: section.className || section.tagName.toLowerCase()
        }));

        const projects = Array.from(document.querySelectorAll(
            '.project, .case-study, .portfolio-item'
        )).map(project => ({
            title: heading(project),
            description: (() => {
                const p = project.querySelector('p');
                return p && p.textContent ? p.textContent.trim() : '';
            })(),
            images: Array.from(project.querySelectorAll('img'))
                .map(img => img.src)
                .filter(src => src && src.startsWith('http')),
            skills: Array.from(project.querySelectorAll('.skills, .tags, .technologies'))
                .map(text)
                .filter(Boolean)
        }));

        const meta = document.querySelector('meta[name="description"]');

        return {
            title: document.title,
            metaDescription: meta ? (meta.getAttribute('content') || '') : '',
            sections,
            projects,
            skills: Array.from(document.querySelectorAll('.skills, .tags, .technologies, .expertise'))
                .map(text)
                .filter(Boolean),
            contact: Array.from(document.querySelectorAll('.contact, .social, .links'))
                .map(text)
                .filter(Boolean)
        };
    })()
"#;

/// Absolute hyperlink targets in DOM order. The browser resolves
/// relative hrefs through the anchor's `href` property.
pub const LINKS_SCRIPT: &str = r"
    (() => {
        return Array.from(document.querySelectorAll('a[href]'))
            .map(a => a.href)
            .filter(Boolean);
    })()
";
