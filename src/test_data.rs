#[cfg(test)]
pub const BLOG_POST_MD: &str = "---
title: What I learned after 20+ years of software development
description: How to be a great software engineer?
publishDate: 2022-04-02
heroImage: /blog/learned/hero.jpg
tags:
  - career
  - software
---
How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

<!-- more -->

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. You solved many hard problems.
It's common to think you are awesome and the smartest person in the planet.
";

#[cfg(test)]
pub const BLOG_POST_TOML: &str = "+++
title = \"How to write a code review\"
description = \"Reviewing is also writing\"
publishDate = 2022-04-02T12:05:00Z
show = false
+++

Draft, not published yet.
";

#[cfg(test)]
pub const PORTFOLIO_MD: &str = "---
title: Inkwell
description: A markdown blog platform that lets you in control of your data
publishDate: \"2024-02-27 06:20:53.000\"
---
Built with Rust.
";
