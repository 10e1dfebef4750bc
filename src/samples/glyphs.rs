// src/samples/glyphs.rs
// Built-in 15x15 digit patterns, one per class. '#' cells carry ink,
// everything else is background.

const DIGIT_0: &str = "
...............
....#######....
...##.....##...
..##.......##..
..##.......##..
..##.......##..
..##.......##..
..##.......##..
..##.......##..
..##.......##..
..##.......##..
..##.......##..
...##.....##...
....#######....
...............";

const DIGIT_1: &str = "
...............
.......##......
......###......
.....####......
....##.##......
.......##......
.......##......
.......##......
.......##......
.......##......
.......##......
.......##......
.......##......
....########...
...............";

const DIGIT_2: &str = "
...............
....#######....
...##.....##...
..##.......##..
...........##..
...........##..
..........##...
.........##....
........##.....
.......##......
......##.......
.....##........
....##.........
..###########..
...............";

const DIGIT_3: &str = "
...............
....#######....
...##.....##...
...........##..
...........##..
...........##..
........####...
........####...
...........##..
...........##..
...........##..
...........##..
...##.....##...
....#######....
...............";

const DIGIT_4: &str = "
...............
.........##....
........###....
.......####....
......##.##....
.....##..##....
....##...##....
...##....##....
..##.....##....
..#############
.........##....
.........##....
.........##....
.........##....
...............";

const DIGIT_5: &str = "
...............
..###########..
..##...........
..##...........
..##...........
..##...........
..#########....
..........##...
...........##..
...........##..
...........##..
...........##..
...##.....##...
....#######....
...............";

const DIGIT_6: &str = "
...............
.....######....
....##.........
...##..........
..##...........
..##...........
..##.######....
..###.....##...
..##.......##..
..##.......##..
..##.......##..
..##.......##..
...##.....##...
....#######....
...............";

const DIGIT_7: &str = "
...............
..###########..
...........##..
..........##...
..........##...
.........##....
.........##....
........##.....
........##.....
.......##......
.......##......
......##.......
......##.......
.....##........
...............";

const DIGIT_8: &str = "
...............
....#######....
...##.....##...
..##.......##..
..##.......##..
...##.....##...
....#######....
....#######....
...##.....##...
..##.......##..
..##.......##..
..##.......##..
...##.....##...
....#######....
...............";

const DIGIT_9: &str = "
...............
....#######....
...##.....##...
..##.......##..
..##.......##..
..##.......##..
...##.....###..
....######.##..
...........##..
...........##..
..........##...
.........##....
........##.....
......##.......
...............";

const GLYPHS: [&str; 10] = [
    DIGIT_0, DIGIT_1, DIGIT_2, DIGIT_3, DIGIT_4, DIGIT_5, DIGIT_6, DIGIT_7, DIGIT_8, DIGIT_9,
];

/// Pattern for `digit`, or `None` when no glyph exists for that class.
pub(crate) fn pattern(digit: usize) -> Option<&'static str> {
    GLYPHS.get(digit).copied()
}
