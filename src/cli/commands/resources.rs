use clap::{Arg, ArgAction, Command};

pub const CMD_OPEN: &str = "open";
pub const CMD_COURSES: &str = "courses";
pub const CMD_DEPARTMENTS: &str = "departments";
pub const CMD_PERIODS: &str = "periods";
pub const CMD_WORKERS: &str = "workers";
pub const CMD_ENROLLMENTS: &str = "enrollments";
pub const CMD_ATTENDANCES: &str = "attendances";
pub const CMD_SURVEYS: &str = "surveys";

pub const ARG_PATH: &str = "path";
pub const ARG_ID: &str = "id";
pub const ARG_VIEW: &str = "view";
pub const ARG_DATE: &str = "date";
pub const ARG_DEPARTMENT: &str = "department";
pub const ARG_MINE: &str = "mine";
pub const ARG_COURSE: &str = "course";
pub const ARG_QUESTIONS: &str = "questions";

pub const COURSE_VIEWS: [&str; 5] = ["instructors", "enrollments", "attendances", "surveys", "answers"];

fn id_arg(help: &'static str) -> Arg {
    Arg::new(ARG_ID).help(help)
}

fn date_arg() -> Arg {
    Arg::new(ARG_DATE)
        .long(ARG_DATE)
        .help("Restrict attendance to one day (YYYY-MM-DD)")
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_OPEN)
            .about("Open a route as the stored session and print where it lands")
            .arg(
                Arg::new(ARG_PATH)
                    .help("Route path, for example /admin")
                    .required(true),
            ),
        Command::new(CMD_COURSES)
            .about("List courses, show one, or one of its collections")
            .arg(id_arg("Course id"))
            .arg(
                Arg::new(ARG_VIEW)
                    .long(ARG_VIEW)
                    .help("Collection of the course to show")
                    .value_parser(COURSE_VIEWS)
                    .requires(ARG_ID),
            )
            .arg(date_arg().requires(ARG_VIEW)),
        Command::new(CMD_DEPARTMENTS)
            .about("List departments or show one")
            .arg(id_arg("Department id")),
        Command::new(CMD_PERIODS)
            .about("List periods or show one")
            .arg(id_arg("Period id")),
        Command::new(CMD_WORKERS)
            .about("List workers or show one")
            .arg(id_arg("Worker id"))
            .arg(
                Arg::new(ARG_DEPARTMENT)
                    .long(ARG_DEPARTMENT)
                    .help("Only workers of this department")
                    .conflicts_with(ARG_ID),
            ),
        Command::new(CMD_ENROLLMENTS)
            .about("List enrollments or show one")
            .arg(id_arg("Enrollment id"))
            .arg(
                Arg::new(ARG_MINE)
                    .long(ARG_MINE)
                    .help("Only enrollments of the signed-in worker")
                    .action(ArgAction::SetTrue)
                    .conflicts_with(ARG_ID),
            ),
        Command::new(CMD_ATTENDANCES)
            .about("List attendance records or show one")
            .arg(id_arg("Attendance id"))
            .arg(
                Arg::new(ARG_COURSE)
                    .long(ARG_COURSE)
                    .help("Only attendance of this course")
                    .conflicts_with(ARG_ID),
            )
            .arg(date_arg().requires(ARG_COURSE)),
        Command::new(CMD_SURVEYS)
            .about("List surveys or show one")
            .arg(id_arg("Survey id"))
            .arg(
                Arg::new(ARG_QUESTIONS)
                    .long(ARG_QUESTIONS)
                    .help("Show the questions of the survey")
                    .action(ArgAction::SetTrue)
                    .requires(ARG_ID),
            ),
    ]
}
